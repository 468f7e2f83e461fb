//! Error types for sensor-calib crate.

use thiserror::Error;

/// Result type for calibration parameter checks.
pub type CalibResult<T> = Result<T, CalibError>;

/// Invalid calibration parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibError {
    /// Confidence threshold outside [0, 1].
    #[error("invalid confidence threshold: {0} (must be within [0, 1])")]
    InvalidConfidence(f64),

    /// Aspect-ratio tolerance outside (0, 1].
    #[error("invalid aspect ratio tolerance: {0} (must be within (0, 1])")]
    InvalidTolerance(f64),

    /// Scale band is empty, inverted or non-positive.
    #[error("invalid scale band: [{min}, {max}]")]
    InvalidScaleBand {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Frame size with a non-positive side.
    #[error("invalid frame size: {width} x {height}")]
    InvalidFrameSize {
        /// Frame width.
        width: f64,
        /// Frame height.
        height: f64,
    },

    /// Reference object with a non-positive dimension.
    #[error("invalid reference dimensions: {width_mm} x {height_mm} mm")]
    InvalidReference {
        /// Width in millimetres.
        width_mm: f64,
        /// Height in millimetres.
        height_mm: f64,
    },
}
