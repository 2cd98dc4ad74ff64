//! Token resolution. Login and token storage live elsewhere; this module
//! only reads what is already on the machine: the `XBE_TOKEN` environment
//! variable, then the per-host entry in the user credentials file.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::Error;
use crate::Result;

const TOKEN_ENV: &str = "XBE_TOKEN";

#[derive(Deserialize, Default)]
struct CredentialsFile(HashMap<String, HostCredentials>);

#[derive(Deserialize)]
struct HostCredentials {
    token: String,
}

fn credentials_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "xbe", "xbe").map(|dirs| dirs.config_dir().join("credentials.json"))
}

/// Resolves an API token for `base_url`.
///
/// A missing token is `Error::TokenNotFound`, a soft condition: read
/// commands fall back to an unauthenticated request, write commands turn it
/// into an "authentication required" failure. An unreadable or malformed
/// credentials file is a hard error.
pub fn resolve_token(base_url: &str) -> Result<String> {
    if let Ok(token) = env::var(TOKEN_ENV) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    let host = Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .ok_or(Error::TokenNotFound)?;
    let path = credentials_path().ok_or(Error::TokenNotFound)?;

    let raw = match fs::read(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(Error::TokenNotFound),
        Err(err) => return Err(Error::Credentials(format!("{}: {err}", path.display()))),
    };
    let credentials: CredentialsFile = serde_json::from_slice(&raw)
        .map_err(|err| Error::Credentials(format!("{}: {err}", path.display())))?;

    credentials
        .0
        .get(&host)
        .map(|entry| entry.token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(Error::TokenNotFound)
}
