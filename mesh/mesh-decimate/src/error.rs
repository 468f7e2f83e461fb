//! Error types for mesh decimation operations.

use thiserror::Error;

/// Errors that can occur during decimation operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DecimateError {
    /// Merge distance is not a positive finite number.
    #[error("Invalid distance threshold: {0} (must be positive and finite)")]
    InvalidThreshold(f64),
}

/// Result type for decimation operations.
pub type DecimateResult<T> = std::result::Result<T, DecimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecimateError::InvalidThreshold(-1.5);
        assert!(format!("{err}").contains("-1.5"));
    }
}
