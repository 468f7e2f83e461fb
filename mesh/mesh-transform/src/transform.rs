//! Local-to-world transforms for fragment geometry.

use crate::{TransformError, TransformResult};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

/// A 3D transformation represented as a 4x4 matrix.
///
/// Points are transformed homogeneously (w = 1). Normals are transformed by
/// the inverse-transpose of the upper-left 3x3 block so they stay
/// perpendicular to surfaces under non-uniform scale.
///
/// # Example
///
/// ```
/// use mesh_transform::Transform3D;
/// use nalgebra::{Point3, Vector3};
///
/// let t = Transform3D::scale(2.0, 1.0, 1.0);
/// assert_eq!(t.transform_point(&Point3::new(1.0, 1.0, 1.0)), Point3::new(2.0, 1.0, 1.0));
///
/// // A 45° normal tilts toward the unscaled axis.
/// let n = t.transform_normal(&Vector3::new(1.0, 1.0, 0.0)).unwrap();
/// assert!(n.y > n.x);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    matrix: Matrix4<f64>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for Transform3D {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self::from_matrix(matrix)
    }
}

impl Transform3D {
    /// Wrap a 4x4 matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// Build from 16 values in column-major order, the layout used by
    /// `simd_float4x4` and most graphics APIs.
    #[must_use]
    pub fn from_column_major(values: &[f64; 16]) -> Self {
        Self {
            matrix: Matrix4::from_column_slice(values),
        }
    }

    /// The identity transformation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// A translation.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vector3::new(tx, ty, tz)),
        }
    }

    /// A non-uniform scale about the origin.
    #[must_use]
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)),
        }
    }

    /// A rotation around the Z axis, in radians.
    #[must_use]
    pub fn rotation_z(angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            cos_a, -sin_a, 0.0, 0.0,
            sin_a,  cos_a, 0.0, 0.0,
              0.0,    0.0, 1.0, 0.0,
              0.0,    0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// The underlying 4x4 matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Compose: the result applies `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Whether every matrix entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|v| v.is_finite())
    }

    /// Transform a point (w = 1, translation applies).
    ///
    /// The homogeneous result is used as-is; affine transforms keep w = 1.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let p = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(p.x, p.y, p.z)
    }

    /// Inverse-transpose of the linear part.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotInvertible`] if the 3x3 linear part is
    /// singular.
    pub fn normal_matrix(&self) -> TransformResult<Matrix3<f64>> {
        let linear: Matrix3<f64> = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .map(|inv| inv.transpose())
            .ok_or(TransformError::NotInvertible)
    }

    /// Transform and re-normalize a normal.
    ///
    /// Returns `None` if the linear part is singular or the result has zero
    /// length.
    #[must_use]
    pub fn transform_normal(&self, normal: &Vector3<f64>) -> Option<Vector3<f64>> {
        let m = self.normal_matrix().ok()?;
        (m * normal).try_normalize(f64::EPSILON)
    }
}
