//! Error types and error handling for Folio.
//!
//! A single error enum covers the chunking core and the collaborators
//! around it (document loading, embeddings, index persistence). Errors
//! raised by collaborators are propagated unchanged to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for Folio
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Index not found in {}", .0.display())]
    IndexNotFound(PathBuf),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl FolioError {
    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FolioError::FileNotFound(_) | FolioError::IndexNotFound(_)
        )
    }
}
