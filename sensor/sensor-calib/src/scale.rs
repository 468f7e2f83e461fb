//! Scale factor computation.

use crate::quad::{ImagePoint, ImageSize};
use crate::reference::ReferenceObject;

/// Length in image units of the longer of edges 0→1 and 1→2, after
/// denormalizing the corners by `image_size`.
#[must_use]
pub fn longest_edge(corners: &[ImagePoint; 4], image_size: ImageSize) -> f64 {
    let [p0, p1, p2, _] = corners.map(|p| p.denormalize(image_size));
    p0.distance(p1).max(p1.distance(p2))
}

/// Metres per image unit.
///
/// The longer physical side of `reference` is matched against the longer
/// of the first two quad edges. A zero-length edge gives an infinite scale,
/// which [`CalibrationParams::in_band`](crate::CalibrationParams::in_band)
/// rejects.
///
/// # Example
///
/// ```
/// use sensor_calib::{scale_factor, ImagePoint, ImageSize, ReferenceObject};
///
/// // Card spanning 42.8 % of a 1000 px wide frame.
/// let corners = [
///     ImagePoint::new(0.2, 0.4),
///     ImagePoint::new(0.628, 0.4),
///     ImagePoint::new(0.628, 0.67),
///     ImagePoint::new(0.2, 0.67),
/// ];
/// let s = scale_factor(&corners, ImageSize::new(1000.0, 1000.0), ReferenceObject::CreditCard);
/// assert!((s - 2.0e-4).abs() < 1e-9);
/// ```
#[must_use]
pub fn scale_factor(corners: &[ImagePoint; 4], image_size: ImageSize, reference: ReferenceObject) -> f64 {
    reference.longest_side_m() / longest_edge(corners, image_size)
}
