//! Error types for cf-capture crate.

use std::path::PathBuf;

use mesh_fuse::FuseError;
use sensor_calib::CalibError;
use thiserror::Error;

/// Result type for capture-context operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors raised while configuring or running a capture context.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`CoreConfig`](crate::CoreConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Fusion parameters are invalid.
    #[error("invalid fusion config: {0}")]
    Fuse(#[from] FuseError),

    /// Calibration parameters are invalid.
    #[error("invalid calibration config: {0}")]
    Calib(#[from] CalibError),

    /// The fusion thread could not be started.
    #[error("failed to spawn fusion worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The fusion thread has exited.
    #[error("fusion worker stopped")]
    WorkerStopped,
}
