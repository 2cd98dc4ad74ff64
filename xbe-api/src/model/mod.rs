pub mod document;
pub mod error;
pub mod organization;
pub mod relationship;
pub mod resource;

use std::collections::HashMap;

use serde_json::Value;

pub type Id = String;
pub type Meta = HashMap<String, Value>;
