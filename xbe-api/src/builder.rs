//! Request-document assembly for `create` and `update` commands: flags map
//! onto attributes and relationships, and anything left blank stays out of
//! the body so the server applies its own defaults.

use serde_json::Value;

use crate::model::document::Document;
use crate::model::relationship::Relationship;
use crate::model::resource::Resource;

#[derive(Debug, Clone, Default)]
pub struct ResourceBuilder {
    resource: Resource,
}

impl ResourceBuilder {
    pub fn new(ty: &str) -> Self {
        Self { resource: Resource { ty: ty.to_string(), ..Default::default() } }
    }

    /// Resource id, for `PATCH` bodies.
    pub fn id(mut self, id: &str) -> Self {
        self.resource.id = id.to_string();
        self
    }

    pub fn attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.resource.attributes.insert(key, value.into());
        self
    }

    /// String attribute, set only when non-blank.
    pub fn attr_if(self, key: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        self.attr(key, value)
    }

    /// Tri-state boolean passed as `"true"`/`"false"`; any other value
    /// leaves the attribute untouched.
    pub fn flag_if(self, key: &str, raw: &str) -> Self {
        match raw.trim() {
            "true" => self.attr(key, true),
            "false" => self.attr(key, false),
            _ => self,
        }
    }

    /// Integer attribute, set only when the option is present.
    pub fn int_if(self, key: &str, value: Option<i64>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// To-one relationship, skipped when `id` is blank.
    pub fn to_one(mut self, name: &str, ty: &str, id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() {
            return self;
        }
        self.resource.relationships.insert(name.to_string(), Relationship::to_one(ty, id));
        self
    }

    /// Explicit `data: null`, clearing a to-one relationship.
    pub fn clear_to_one(mut self, name: &str) -> Self {
        self.resource.relationships.insert(name.to_string(), Relationship::empty());
        self
    }

    pub fn to_many(mut self, name: &str, ty: &str, ids: &[String]) -> Self {
        self.resource
            .relationships
            .insert(name.to_string(), Relationship::to_many(ty, ids.iter().cloned()));
        self
    }

    pub fn build(self) -> Document { Document::single_resource(self.resource) }
}
