//! Error types for the SPIF library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SPIF operations.
#[derive(Debug, Error)]
pub enum SpifError {
    /// Referenced definition file does not exist.
    #[error("Definition file not found: {path}")]
    NotFound { path: PathBuf },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Definition file extension not recognised as JSON or YAML.
    #[error("Unsupported definition format: {0}")]
    UnsupportedFormat(String),

    /// Document does not match the declared entity shape.
    ///
    /// Raised during parsing, before any semantic rule runs. The message
    /// names the offending field path as reported by the deserializer.
    #[error("Structural error in '{path}': {message}")]
    Structural { path: PathBuf, message: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for SPIF operations.
pub type Result<T> = std::result::Result<T, SpifError>;
