//! JSON:API plumbing for the XBE platform: the generic document model,
//! relationship resolution, query building, request-document assembly and a
//! blocking HTTP client shared by every `xbe` subcommand.

pub mod auth;
pub mod builder;
pub mod client;
pub mod error;
pub mod model;
pub mod query;
pub mod resolve;

pub use crate::client::{Client, JSON_API_HEADER};
pub use crate::error::{Error, Result};
