//! Consolidated world-space mesh.

use crate::{Aabb, MeshBounds, MeshError, MeshResult, MeshTopology};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A world-space triangle mesh produced by fusing fragments.
///
/// # Invariants
///
/// - every index in `faces` is `< vertices.len()`
/// - `normals` is either empty or has exactly one unit normal per vertex
///
/// Bounds are not stored; [`MeshBounds::bounds`] derives them from the
/// current vertex set, so they always match what is returned.
///
/// # Example
///
/// ```
/// use mesh_types::{FusedMesh, MeshTopology, Point3};
///
/// let mesh = FusedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
///     Vec::new(),
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert!(!mesh.has_normals());
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusedMesh {
    /// World-space vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,

    /// World-space unit normals, parallel to `vertices`, or empty.
    pub normals: Vec<Vector3<f64>>,
}

impl FusedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    ///
    /// Normal capacity is only reserved when `with_normals` is set.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize, with_normals: bool) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            normals: if with_normals {
                Vec::with_capacity(vertex_count)
            } else {
                Vec::new()
            },
        }
    }

    /// Create a mesh from its parts without checking invariants.
    #[inline]
    #[must_use]
    pub const fn from_parts(
        vertices: Vec<Point3<f64>>,
        faces: Vec<[u32; 3]>,
        normals: Vec<Vector3<f64>>,
    ) -> Self {
        Self {
            vertices,
            faces,
            normals,
        }
    }

    /// Flat index view: `3 × face_count` entries, three per triangle.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        self.faces.as_flattened()
    }

    /// Whether the mesh carries per-vertex normals.
    #[inline]
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Flat `x, y, z` positions.
    #[must_use]
    pub fn positions_flat(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Flat `x, y, z` normals (empty when there are none).
    #[must_use]
    pub fn normals_flat(&self) -> Vec<f64> {
        self.normals.iter().flat_map(|n| [n.x, n.y, n.z]).collect()
    }

    /// Drop all normals.
    pub fn clear_normals(&mut self) {
        self.normals.clear();
    }

    /// Check the index and normal-correspondence invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> MeshResult<()> {
        if self.has_normals() && self.normals.len() != self.vertices.len() {
            return Err(MeshError::NormalCountMismatch {
                normals: self.normals.len(),
                vertices: self.vertices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

impl MeshTopology for FusedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
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

impl MeshBounds for FusedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}
