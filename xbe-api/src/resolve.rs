//! Relationship resolution: the denormalization step every `list` and
//! `show` command leans on. A resource's relationships carry only
//! `(type, id)` linkage; the labels live in the response's `included` set,
//! and a caller may not have requested that sideload at all, so everything
//! here degrades to the bare id.

use crate::model::document::Included;
use crate::model::organization::OrganizationKind;
use crate::model::resource::{Resource, ResourceIdentifier};

/// Attributes tried in order when labelling a related resource.
pub const LABEL_PREFERENCE: &[&str] = &["company-name", "name", "title"];

/// A resolved relationship target: the id is always present, the label only
/// when the target was sideloaded and carried a display attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ref {
    pub id: String,
    pub label: String,
}

impl Ref {
    /// Label when known, bare id otherwise. Never empty for a non-empty id.
    pub fn display(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// First candidate that is non-blank after trimming.
pub fn first_non_empty<'a, I>(candidates: I) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find(|s| !s.trim().is_empty()).unwrap_or("")
}

/// Display label of a resource: the first non-empty attribute from
/// `preference`, trimmed.
pub fn label_of(resource: &Resource, preference: &[&str]) -> String {
    preference
        .iter()
        .map(|key| resource.attributes.trimmed(key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Resolves a to-one relationship with the default label preference.
pub fn resolve(resource: &Resource, name: &str, included: &Included) -> Option<Ref> {
    resolve_with(resource, name, included, LABEL_PREFERENCE)
}

/// Resolves a to-one relationship. `None` when the relationship is absent
/// or its data is null; a `Ref` with an empty label when the target was not
/// sideloaded.
pub fn resolve_with(
    resource: &Resource, name: &str, included: &Included, preference: &[&str],
) -> Option<Ref> {
    let relationship = resource.relationships.get(name)?;
    let target = relationship.data.first()?;
    Some(make_ref(target, included, preference))
}

/// Resolves a to-many relationship, preserving the linkage array order.
pub fn resolve_many(resource: &Resource, name: &str, included: &Included) -> Vec<Ref> {
    resolve_many_with(resource, name, included, LABEL_PREFERENCE)
}

pub fn resolve_many_with(
    resource: &Resource, name: &str, included: &Included, preference: &[&str],
) -> Vec<Ref> {
    match resource.relationships.get(name) {
        Some(relationship) => relationship
            .data
            .all()
            .into_iter()
            .map(|target| make_ref(target, included, preference))
            .collect(),
        None => Vec::new(),
    }
}

/// A polymorphic organization reference with its parsed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub kind: OrganizationKind,
    pub reference: Ref,
}

/// Resolves a polymorphic organization relationship. A type string outside
/// the known organization kinds is logged and treated as unresolvable.
pub fn resolve_organization(
    resource: &Resource, name: &str, included: &Included,
) -> Option<Organization> {
    let relationship = resource.relationships.get(name)?;
    let target = relationship.data.first()?;
    let Some(kind) = OrganizationKind::from_type(&target.ty) else {
        log::warn!("unknown organization type `{}` on relationship `{}`", target.ty, name);
        return None;
    };
    Some(Organization { kind, reference: make_ref(target, included, LABEL_PREFERENCE) })
}

fn make_ref(target: &ResourceIdentifier, included: &Included, preference: &[&str]) -> Ref {
    let label = included.get(target).map(|inc| label_of(inc, preference)).unwrap_or_default();
    Ref { id: target.id.clone(), label }
}
