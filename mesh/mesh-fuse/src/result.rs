//! Fusion statistics.

use mesh_types::FusedMesh;

/// A fused mesh plus what happened while building it.
#[derive(Debug, Clone)]
pub struct FusionResult {
    /// The fused mesh.
    pub mesh: FusedMesh,

    /// Fragments that contributed at least one vertex.
    pub fragments_used: usize,

    /// Vertices before decimation.
    pub input_vertices: usize,

    /// Triangles skipped because they referenced vertices outside their
    /// own fragment.
    pub skipped_triangles: usize,

    /// Whether world-space normals were produced.
    pub normals_kept: bool,

    /// Decimation passes run (0 when the mesh was within budget).
    pub decimation_passes: u32,

    /// Merge distance of the last pass, if any ran.
    pub final_threshold: Option<f64>,
}

impl FusionResult {
    /// Whether decimation ran.
    #[must_use]
    pub const fn was_decimated(&self) -> bool {
        self.decimation_passes > 0
    }
}

impl std::fmt::Display for FusionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fusion: {} fragments, {} → {} vertices, {} triangles",
            self.fragments_used,
            self.input_vertices,
            self.mesh.vertices.len(),
            self.mesh.faces.len()
        )?;
        if self.skipped_triangles > 0 {
            write!(f, " ({} skipped)", self.skipped_triangles)?;
        }
        if let Some(threshold) = self.final_threshold {
            write!(
                f,
                ", {} decimation passes (final threshold {threshold})",
                self.decimation_passes
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let result = FusionResult {
            mesh: FusedMesh::new(),
            fragments_used: 3,
            input_vertices: 1200,
            skipped_triangles: 2,
            normals_kept: true,
            decimation_passes: 2,
            final_threshold: Some(0.04),
        };
        let s = result.to_string();
        assert!(s.contains("3 fragments"));
        assert!(s.contains("1200 → 0 vertices"));
        assert!(s.contains("(2 skipped)"));
        assert!(s.contains("final threshold 0.04"));
        assert!(result.was_decimated());
    }
}
