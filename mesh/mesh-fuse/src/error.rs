//! Error types for fragment fusion.

use mesh_decimate::DecimateError;
use thiserror::Error;

/// Result type for fusion operations.
pub type FuseResult<T> = Result<T, FuseError>;

/// Errors from invalid fusion parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuseError {
    /// The vertex budget must allow at least one vertex.
    #[error("vertex budget must be at least 1")]
    ZeroVertexBudget,

    /// At least one decimation pass is needed to enforce the budget.
    #[error("max decimation passes must be at least 1")]
    ZeroDecimationPasses,

    /// Invalid decimation parameters.
    #[error("decimation: {0}")]
    Decimate(#[from] DecimateError),
}
