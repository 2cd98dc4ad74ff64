use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::resource::IdentifierData;

pub type Relationships = HashMap<String, Relationship>;

/// Relationship with another resource. Only the linkage matters to this
/// client; relationship-level links and meta are ignored on decode.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Relationship {
    #[serde(default)]
    pub data: IdentifierData,
}

impl Relationship {
    pub fn to_one(ty: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            data: IdentifierData::Single(Some(super::resource::ResourceIdentifier::new(ty, id))),
        }
    }

    /// An explicit `data: null`, which clears a to-one relationship on the
    /// server.
    pub fn empty() -> Self { Self { data: IdentifierData::Single(None) } }

    pub fn to_many<I, S>(ty: impl Into<String> + Clone, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data = ids
            .into_iter()
            .map(|id| super::resource::ResourceIdentifier::new(ty.clone(), id))
            .collect();
        Self { data: IdentifierData::Multiple(data) }
    }
}
