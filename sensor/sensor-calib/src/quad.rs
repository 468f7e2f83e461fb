//! Image-space points and detected quadrilaterals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2-D point in image space.
///
/// Normalized points lie in [0, 1] on both axes; pixel points are in pixels.
/// The origin is top-left with y pointing down unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImagePoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl ImagePoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale a normalized point to a frame of the given size.
    #[must_use]
    pub fn denormalize(self, size: ImageSize) -> Self {
        Self::new(self.x * size.width, self.y * size.height)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for ImagePoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Size of an image or frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl ImageSize {
    /// The unit frame: denormalizing by it is the identity.
    pub const NORMALIZED: Self = Self::new(1.0, 1.0);

    /// Creates a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::NORMALIZED
    }
}

/// Where a detector puts the image origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CoordinateOrigin {
    /// y grows downward from the top-left corner.
    #[default]
    TopLeft,
    /// y grows upward from the bottom-left corner.
    BottomLeft,
}

/// A detected quadrilateral.
///
/// Corners are normalized, top-left origin, ordered top-left, top-right,
/// bottom-right, bottom-left.
///
/// # Example
///
/// ```
/// use sensor_calib::{ImagePoint, QuadObservation};
///
/// let quad = QuadObservation::new(
///     [
///         ImagePoint::new(0.1, 0.1),
///         ImagePoint::new(0.5, 0.1),
///         ImagePoint::new(0.5, 0.3),
///         ImagePoint::new(0.1, 0.3),
///     ],
///     0.9,
/// );
/// assert!((quad.aspect_ratio() - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadObservation {
    /// TL, TR, BR, BL.
    pub corners: [ImagePoint; 4],
    /// Detector confidence in [0, 1].
    pub confidence: f64,
}

impl QuadObservation {
    /// Creates an observation.
    #[must_use]
    pub const fn new(corners: [ImagePoint; 4], confidence: f64) -> Self {
        Self {
            corners,
            confidence,
        }
    }

    /// Width and height of the axis-aligned box around the corners.
    #[must_use]
    pub fn extents(&self) -> (f64, f64) {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &self.corners {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x, max_y - min_y)
    }

    /// Bounding-box `width / height`. Infinite or NaN for a flat box.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.extents();
        w / h
    }

    /// Convert to the top-left convention, flipping y (`y → 1 − y`) for
    /// bottom-left detectors. Corner order is kept as reported.
    #[must_use]
    pub fn to_top_left(self, origin: CoordinateOrigin) -> Self {
        match origin {
            CoordinateOrigin::TopLeft => self,
            CoordinateOrigin::BottomLeft => Self {
                corners: self.corners.map(|p| ImagePoint::new(p.x, 1.0 - p.y)),
                confidence: self.confidence,
            },
        }
    }
}
