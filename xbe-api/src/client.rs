use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use crate::error::Error;
use crate::model::document::Document;
use crate::model::error::summarize;
use crate::query::Query;
use crate::Result;

/// Media type for JSON:API requests and responses.
pub const JSON_API_HEADER: &str = "application/vnd.api+json";

/// Deadline for any single request; no command performs concurrent work, so
/// this bounds the whole network portion of an invocation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the XBE backend. One request per call; no
/// retries, no backoff.
pub struct Client {
    base: Url,
    token: Option<String>,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|source| Error::InvalidBaseUrl { url: base_url.to_string(), source })?;
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("xbe-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { base, token, http })
    }

    pub fn get(&self, path: &str, query: &Query) -> Result<Document> {
        self.execute(Method::GET, path, Some(query), None)
    }

    pub fn post(&self, path: &str, document: &Document) -> Result<Document> {
        self.execute(Method::POST, path, None, Some(document))
    }

    pub fn patch(&self, path: &str, document: &Document) -> Result<Document> {
        self.execute(Method::PATCH, path, None, Some(document))
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None, None).map(|_| ())
    }

    fn execute(
        &self, method: Method, path: &str, query: Option<&Query>, body: Option<&Document>,
    ) -> Result<Document> {
        let bytes = self.send(method, path, query, body)?;
        if bytes.is_empty() {
            return Ok(Document::default());
        }
        Document::from_slice(&bytes)
    }

    fn send(
        &self, method: Method, path: &str, query: Option<&Query>, body: Option<&Document>,
    ) -> Result<Vec<u8>> {
        let mut url = self
            .base
            .join(path)
            .map_err(|source| Error::InvalidBaseUrl { url: path.to_string(), source })?;
        if let Some(query) = query {
            if !query.is_empty() {
                url.set_query(Some(&query.encode()));
            }
        }

        log::debug!("{method} {url}");

        let mut request = self.http.request(method, url).header(ACCEPT, JSON_API_HEADER);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(document) = body {
            request = request
                .header(CONTENT_TYPE, JSON_API_HEADER)
                .body(serde_json::to_vec(document)?);
        }

        let response = request.send()?;
        let status = response.status();
        let bytes = response.bytes()?.to_vec();
        if status.is_success() {
            return Ok(bytes);
        }

        let message = summarize(&bytes)
            .unwrap_or_else(|| format!("server returned HTTP {}", status.as_u16()));
        Err(Error::Api {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            message,
        })
    }
}
