//! Calibration parameters.

use crate::error::{CalibError, CalibResult};
use crate::quad::ImageSize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning for candidate selection and result validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationParams {
    /// A candidate is accepted automatically when its confidence is strictly
    /// above this; results are valid when at or above it. Default: 0.75
    pub min_confidence: f64,

    /// Allowed relative deviation of a candidate's aspect ratio from the
    /// reference ratio. Default: 0.10
    pub aspect_ratio_tolerance: f64,

    /// Plausible scale factors, metres per image unit, inclusive.
    /// Default: [1e-4, 1e-2]
    pub scale_band: [f64; 2],

    /// Size used to denormalize automatically detected corners.
    /// Default: 1 × 1 (scale per normalized unit)
    pub frame_size: ImageSize,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            min_confidence: 0.75,
            aspect_ratio_tolerance: 0.10,
            scale_band: [1e-4, 1e-2],
            frame_size: ImageSize::NORMALIZED,
        }
    }
}

impl CalibrationParams {
    /// Creates parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame size for the automatic path.
    #[must_use]
    pub const fn with_frame_size(mut self, frame_size: ImageSize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Sets the confidence threshold.
    #[must_use]
    pub const fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Sets the aspect-ratio tolerance.
    #[must_use]
    pub const fn with_aspect_ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.aspect_ratio_tolerance = tolerance;
        self
    }

    /// Whether `ratio` is within tolerance of `target`. NaN never matches.
    #[must_use]
    pub fn ratio_matches(&self, ratio: f64, target: f64) -> bool {
        ((ratio - target).abs() / target) <= self.aspect_ratio_tolerance
    }

    /// Whether `scale` lies inside the plausible band.
    #[must_use]
    pub fn in_band(&self, scale: f64) -> bool {
        let [min, max] = self.scale_band;
        scale.is_finite() && (min..=max).contains(&scale)
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> CalibResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CalibError::InvalidConfidence(self.min_confidence));
        }
        let tol = self.aspect_ratio_tolerance;
        if !(tol > 0.0 && tol <= 1.0) {
            return Err(CalibError::InvalidTolerance(tol));
        }
        let [min, max] = self.scale_band;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(CalibError::InvalidScaleBand { min, max });
        }
        if !self.frame_size.is_valid() {
            return Err(CalibError::InvalidFrameSize {
                width: self.frame_size.width,
                height: self.frame_size.height,
            });
        }
        Ok(())
    }
}
