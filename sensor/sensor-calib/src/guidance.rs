//! User-facing help for calibration.

use crate::reference::ReferenceObject;

/// How to place `reference` so it can be detected.
#[must_use]
pub const fn instructions(reference: &ReferenceObject) -> &'static str {
    match reference {
        ReferenceObject::CreditCard => {
            "Place a credit card flat on a surface and ensure all corners are visible in the camera view."
        }
        ReferenceObject::UsLetter => {
            "Place a standard US letter size paper flat on a surface with all corners visible."
        }
        ReferenceObject::Custom { .. } => {
            "Place your reference object flat on a surface with all corners clearly visible."
        }
    }
}

/// Objects most users have at hand, in order of preference.
#[must_use]
pub const fn recommended_reference_objects() -> [ReferenceObject; 2] {
    [ReferenceObject::CreditCard, ReferenceObject::UsLetter]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions() {
        assert!(instructions(&ReferenceObject::CreditCard).starts_with("Place a credit card"));
        assert!(instructions(&ReferenceObject::UsLetter).contains("US letter"));
        let custom = ReferenceObject::Custom {
            width_mm: 100.0,
            height_mm: 50.0,
        };
        assert_eq!(
            instructions(&custom),
            "Place your reference object flat on a surface with all corners clearly visible."
        );
    }

    #[test]
    fn test_recommended() {
        assert_eq!(
            recommended_reference_objects(),
            [ReferenceObject::CreditCard, ReferenceObject::UsLetter]
        );
    }
}
