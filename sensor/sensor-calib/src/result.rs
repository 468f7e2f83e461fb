//! Calibration results.

use crate::quad::ImagePoint;
use crate::reference::ReferenceObject;
use crate::time::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A completed calibration. Superseded by later results, never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationResult {
    /// Metres per image unit.
    pub scale_factor: f64,
    /// Detector confidence, or 1.0 for manual calibration.
    pub confidence: f64,
    /// Corners the scale was measured from (TL, TR, BR, BL).
    pub corners: [ImagePoint; 4],
    /// Object that was measured.
    pub reference: ReferenceObject,
    /// When the result was produced.
    pub timestamp: Timestamp,
}

impl CalibrationResult {
    /// Convert a length in image units to metres.
    #[must_use]
    pub fn to_metres(&self, image_units: f64) -> f64 {
        image_units * self.scale_factor
    }
}

impl std::fmt::Display for CalibrationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Calibration: {:.3e} m/unit from {} (confidence {:.2})",
            self.scale_factor,
            self.reference.display_name(),
            self.confidence
        )
    }
}
