pub mod sort;

use std::collections::BTreeMap;

use itertools::Itertools;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::query::sort::SortQuery;

/// Characters escaped in query keys and values. Brackets stay readable,
/// per the JSON:API `filter[...]`/`page[...]` convention.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

/// Builder for JSON:API request query strings: sparse fieldsets, sideloads,
/// filters, sort and offset pagination. Keys are kept in sorted maps so the
/// same inputs always encode to the same string.
#[derive(Debug, Clone, Default)]
pub struct Query {
    include: Vec<String>,
    fields: BTreeMap<String, String>,
    filters: BTreeMap<String, String>,
    sort: SortQuery,
    limit: u32,
    offset: u32,
}

impl Query {
    pub fn new() -> Self { Self::default() }

    /// Sideloads the named relationships.
    pub fn include(mut self, relationships: &[&str]) -> Self {
        self.include.extend(relationships.iter().map(|r| (*r).to_string()));
        self
    }

    /// Restricts resources of `ty` to the given attribute set.
    pub fn fields(mut self, ty: &str, attributes: &[&str]) -> Self {
        self.fields.insert(ty.to_string(), attributes.join(","));
        self
    }

    /// Sets `filter[key]` only when `value` is non-blank after trimming.
    /// A blank value omits the key entirely; the server, not the client,
    /// defines default filtering.
    pub fn filter(mut self, key: &str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() {
            self.filters.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Appends a comma-separated sort spec, `-` prefix for descending.
    pub fn sort(mut self, spec: &str) -> Self {
        self.sort.insert_raw(spec);
        self
    }

    /// Offset pagination. Each parameter is emitted only when strictly
    /// positive, so the server's own defaults apply when unset.
    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
            && self.fields.is_empty()
            && self.filters.is_empty()
            && self.sort.is_empty()
            && self.limit == 0
            && self.offset == 0
    }

    /// Ordered key/value pairs before percent-encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (ty, attributes) in &self.fields {
            pairs.push((format!("fields[{ty}]"), attributes.clone()));
        }
        if !self.include.is_empty() {
            pairs.push(("include".to_string(), self.include.iter().join(",")));
        }
        for (key, value) in &self.filters {
            pairs.push((format!("filter[{key}]"), value.clone()));
        }
        if let Some(sort) = self.sort.to_param() {
            pairs.push(("sort".to_string(), sort));
        }
        if self.limit > 0 {
            pairs.push(("page[limit]".to_string(), self.limit.to_string()));
        }
        if self.offset > 0 {
            pairs.push(("page[offset]".to_string(), self.offset.to_string()));
        }
        pairs
    }

    /// Percent-encoded query string.
    pub fn encode(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_ESCAPE),
                    utf8_percent_encode(value, QUERY_ESCAPE)
                )
            })
            .join("&")
    }
}
