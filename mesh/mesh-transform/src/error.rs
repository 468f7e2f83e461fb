//! Error types for transform operations.

use thiserror::Error;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur when transforming geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The linear part of the matrix is singular.
    #[error("matrix is not invertible")]
    NotInvertible,
}
