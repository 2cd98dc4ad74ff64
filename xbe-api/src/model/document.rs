use std::collections::HashMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Error;
use crate::model::resource::{Resource, ResourceIdentifier, Resources};
use crate::model::Meta;
use crate::Result;

/// Sideloaded resources keyed by `(type, id)` for O(1) lookup during
/// relationship resolution.
pub type Included = HashMap<ResourceIdentifier, Resource>;

/// Primary `data` of a response: one resource or a list of them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrimaryData {
    Single(Box<Resource>),
    Multiple(Resources),
}

/// Top-level JSON:API document. Resources are ephemeral: a document lives
/// for one request/response cycle and is flattened into display rows right
/// after decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub data: Option<PrimaryData>,
    pub included: Included,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    data: Option<PrimaryData>,
    #[serde(default)]
    included: Resources,
    #[serde(default)]
    meta: Meta,
}

impl Document {
    /// Decodes raw response bytes, keying `included` as it goes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        let included = raw.included.into_iter().map(|r| (r.identifier(), r)).collect();
        Ok(Self { data: raw.data, included, meta: raw.meta })
    }

    /// A request document carrying one resource and nothing else.
    pub fn single_resource(resource: Resource) -> Self {
        Self { data: Some(PrimaryData::Single(Box::new(resource))), ..Default::default() }
    }

    pub fn into_single(self) -> Result<(Resource, Included)> {
        match self.data {
            Some(PrimaryData::Single(resource)) => Ok((*resource, self.included)),
            _ => Err(Error::UnexpectedDocument { expected: "a single resource" }),
        }
    }

    pub fn into_collection(self) -> Result<(Resources, Included)> {
        match self.data {
            Some(PrimaryData::Multiple(resources)) => Ok((resources, self.included)),
            _ => Err(Error::UnexpectedDocument { expected: "a resource collection" }),
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Document", 3)?;
        match &self.data {
            Some(data) => state.serialize_field("data", data)?,
            None => state.serialize_field("data", &serde_json::Value::Null)?,
        }
        if !self.included.is_empty() {
            state.serialize_field("included", &self.included.values().collect::<Vec<_>>())?;
        }
        if !self.meta.is_empty() {
            state.serialize_field("meta", &self.meta)?;
        }
        state.end()
    }
}
