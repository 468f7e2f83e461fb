//! Traits for mesh types.

use crate::Aabb;
use nalgebra::Point3;

/// Minimal topology view shared by fragments and fused meshes.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn face_count(&self) -> usize;

    /// A mesh is empty when it has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Position of a vertex, or `None` if the index is out of bounds.
    fn position(&self, index: usize) -> Option<&Point3<f64>>;

    /// Vertex indices of a face, or `None` if the index is out of bounds.
    fn face(&self, index: usize) -> Option<[u32; 3]>;
}

/// Trait for types that can compute a bounding box.
pub trait MeshBounds {
    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if there are no vertices.
    fn bounds(&self) -> Aabb;

    /// Compute the bounding box, returning `None` if empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() { None } else { Some(b) }
    }

    /// Center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
