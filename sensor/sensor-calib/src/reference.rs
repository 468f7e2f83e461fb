//! Reference objects of known physical size.

use crate::error::{CalibError, CalibResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An object with known physical dimensions, used to recover scale.
///
/// # Example
///
/// ```
/// use sensor_calib::ReferenceObject;
///
/// let card = ReferenceObject::CreditCard;
/// assert_eq!(card.dimensions_mm(), (85.6, 53.98));
/// assert!((card.longest_side_m() - 0.0856).abs() < 1e-12);
/// assert_eq!(card.display_name(), "Credit Card");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReferenceObject {
    /// ISO/IEC 7810 ID-1 card, 85.6 × 53.98 mm.
    #[default]
    CreditCard,
    /// US letter paper, 215.9 × 279.4 mm.
    UsLetter,
    /// Anything else, measured by the user.
    Custom {
        /// Width in millimetres.
        width_mm: f64,
        /// Height in millimetres.
        height_mm: f64,
    },
}

impl ReferenceObject {
    /// Width and height in millimetres.
    #[must_use]
    pub const fn dimensions_mm(&self) -> (f64, f64) {
        match *self {
            Self::CreditCard => (85.6, 53.98),
            Self::UsLetter => (215.9, 279.4),
            Self::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// `width / height`.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.dimensions_mm();
        w / h
    }

    /// The longer physical side, in metres.
    #[must_use]
    pub fn longest_side_m(&self) -> f64 {
        let (w, h) = self.dimensions_mm();
        w.max(h) / 1000.0
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::UsLetter => "US Letter Paper",
            Self::Custom { .. } => "Custom Object",
        }
    }

    /// Check that both dimensions are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`CalibError::InvalidReference`] otherwise.
    pub fn validate(&self) -> CalibResult<()> {
        let (width_mm, height_mm) = self.dimensions_mm();
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(width_mm) && ok(height_mm) {
            Ok(())
        } else {
            Err(CalibError::InvalidReference {
                width_mm,
                height_mm,
            })
        }
    }
}

impl std::fmt::Display for ReferenceObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.dimensions_mm();
        write!(f, "{} ({w} × {h} mm)", self.display_name())
    }
}
