//! Result types for decimation operations.

// Vertex counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::FusedMesh;

/// Result of spatial-merge decimation.
#[derive(Debug, Clone)]
pub struct DecimationResult {
    /// The decimated mesh.
    pub mesh: FusedMesh,

    /// Number of vertices in the input mesh.
    pub original_vertices: usize,

    /// Number of vertices after merging.
    pub final_vertices: usize,

    /// Number of triangles in the input mesh.
    pub original_triangles: usize,

    /// Number of triangles after rebuilding.
    pub final_triangles: usize,

    /// Triangles dropped because two or more corners merged.
    pub dropped_triangles: usize,

    /// Merge distance that was used.
    pub distance_threshold: f64,
}

impl DecimationResult {
    /// Get the vertex reduction ratio (final / original).
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Get the percentage of vertices removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Check if any vertices were merged.
    #[must_use]
    pub const fn was_decimated(&self) -> bool {
        self.final_vertices < self.original_vertices
    }
}

impl std::fmt::Display for DecimationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decimation: {} → {} vertices ({:.1}% reduction), {} → {} triangles at {} threshold",
            self.original_vertices,
            self.final_vertices,
            self.reduction_percent(),
            self.original_triangles,
            self.final_triangles,
            self.distance_threshold
        )
    }
}
