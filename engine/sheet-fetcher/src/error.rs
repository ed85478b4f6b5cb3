//! Error types for the sheet fetcher

use thiserror::Error;

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors raised while downloading a sheet. Malformed rows never end up here; the parser
/// recovers from them locally.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Failed to read response body from {endpoint}: {source}")]
    Body {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Label of the endpoint that failed, if the error is tied to one
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            FetchError::Request { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Body { endpoint, .. } => Some(endpoint),
            FetchError::Client(_) | FetchError::Config(_) => None,
        }
    }
}
