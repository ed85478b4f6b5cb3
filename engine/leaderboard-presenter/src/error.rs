//! Error types for the presenter

use std::path::PathBuf;
use thiserror::Error;

/// Result type for presenter operations
pub type Result<T> = std::result::Result<T, PresenterError>;

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("Failed to write page to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
