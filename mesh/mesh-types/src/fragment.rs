//! Local mesh fragments as delivered by the tracking layer.

use crate::{Aabb, MeshBounds, MeshTopology};
use nalgebra::{Matrix4, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh buffer in its own local frame, plus the local-to-world transform.
///
/// Fragments are immutable inputs to fusion; nothing downstream keeps a
/// reference to them across calls.
///
/// `normals`, when present, is expected to hold one normal per vertex. A
/// mismatched array is treated as if no normals were supplied.
///
/// # Example
///
/// ```
/// use mesh_types::{Matrix4, MeshFragment, MeshTopology, Point3, Vector3};
///
/// let fragment = MeshFragment::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// )
/// .with_transform(Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)));
///
/// assert_eq!(fragment.vertex_count(), 3);
/// assert!(fragment.usable_normals().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshFragment {
    /// Vertex positions in the fragment's local frame.
    pub vertices: Vec<Point3<f64>>,

    /// Optional per-vertex normals in the local frame.
    #[cfg_attr(feature = "serde", serde(default))]
    pub normals: Option<Vec<Vector3<f64>>>,

    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,

    /// Local-to-world transform.
    #[cfg_attr(feature = "serde", serde(default = "Matrix4::identity"))]
    pub transform: Matrix4<f64>,
}

impl MeshFragment {
    /// Create a fragment with an identity transform and no normals.
    #[must_use]
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            normals: None,
            faces,
            transform: Matrix4::identity(),
        }
    }

    /// Attach per-vertex normals.
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<Vector3<f64>>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Replace the local-to-world transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Matrix4<f64>) -> Self {
        self.transform = transform;
        self
    }

    /// Normals, but only if there is exactly one per vertex.
    #[must_use]
    pub fn usable_normals(&self) -> Option<&[Vector3<f64>]> {
        self.normals
            .as_deref()
            .filter(|n| n.len() == self.vertices.len())
    }

    /// Check whether a face only references vertices of this fragment.
    #[inline]
    #[must_use]
    pub fn face_in_range(&self, face: &[u32; 3]) -> bool {
        face.iter().all(|&i| (i as usize) < self.vertices.len())
    }
}

impl MeshTopology for MeshFragment {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn position(&self, index: usize) -> Option<&Point3<f64>> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }
}

impl MeshBounds for MeshFragment {
    /// Bounds in the fragment's local frame.
    fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}
