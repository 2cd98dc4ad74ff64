use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. The raw body is kept so the top-level handler can
    /// echo it to stderr before the message.
    #[error("{message}")]
    Api {
        status: u16,
        body: String,
        message: String,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected {expected} in response")]
    UnexpectedDocument { expected: &'static str },

    /// No token anywhere. Read commands fall back to unauthenticated
    /// requests on this; write commands report it.
    #[error("no API token found; pass --token or set XBE_TOKEN")]
    TokenNotFound,

    #[error("cannot read credentials: {0}")]
    Credentials(String),
}

impl Error {
    /// Raw response body of a failed API call, when there was one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}
