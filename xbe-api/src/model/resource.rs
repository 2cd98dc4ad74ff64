use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::relationship::Relationships;
use crate::model::Id;

pub type Resources = Vec<Resource>;
pub type ResourceIdentifiers = Vec<ResourceIdentifier>;

/// Attribute map of a resource. Attributes stay untyped at the decode
/// boundary; the accessors coerce on the way out, substituting a zero value
/// when the attribute is absent or null.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Attributes(HashMap<String, Value>);

impl From<HashMap<String, Value>> for Attributes {
    fn from(map: HashMap<String, Value>) -> Self { Self(map) }
}

impl Attributes {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// String attribute; empty when absent, null or not a string.
    pub fn string(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// String attribute with surrounding whitespace removed.
    pub fn trimmed(&self, key: &str) -> String { self.string(key).trim().to_string() }

    pub fn boolean(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }

    pub fn float(&self, key: &str) -> f64 {
        self.0.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn int(&self, key: &str) -> i64 { self.opt_int(key).unwrap_or(0) }

    /// Nullable integer for fields that only matter when set, e.g. an
    /// explicit sort order.
    pub fn opt_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }
}

/// Resource Identifier: the `(type, id)` pair relationships link by.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub ty: String,
    pub id: Id,
}

impl ResourceIdentifier {
    pub fn new(ty: impl Into<String>, id: impl Into<Id>) -> Self {
        Self { ty: ty.into(), id: id.into() }
    }
}

/// Linkage data of a relationship: a single reference, none at all, or an
/// ordered list.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(untagged)]
pub enum IdentifierData {
    Single(Option<ResourceIdentifier>),
    Multiple(ResourceIdentifiers),
}

impl IdentifierData {
    /// The single target, or the first of a to-many list.
    pub fn first(&self) -> Option<&ResourceIdentifier> {
        match self {
            IdentifierData::Single(data) => data.as_ref(),
            IdentifierData::Multiple(data) => data.first(),
        }
    }

    /// All targets, preserving the order of the linkage array.
    pub fn all(&self) -> Vec<&ResourceIdentifier> {
        match self {
            IdentifierData::Single(Some(data)) => vec![data],
            IdentifierData::Single(None) => Vec::new(),
            IdentifierData::Multiple(data) => data.iter().collect(),
        }
    }
}

impl Default for IdentifierData {
    fn default() -> Self { IdentifierData::Single(None) }
}

/// JSON:API Resource
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Resource {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub id: Id,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub relationships: Relationships,
}

impl Resource {
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.ty.clone(), self.id.clone())
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool { self.ty == other.ty && self.id == other.id }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.id.hash(state);
    }
}
