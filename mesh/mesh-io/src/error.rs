//! Error types for mesh export.

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh export and payload parsing.
#[derive(Debug, Error)]
pub enum IoError {
    /// The mesh breaks an invariant and will not be exported.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// Invalid payload content.
    #[error("invalid payload: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The OBJ text was not valid UTF-8.
    #[error("string conversion error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
