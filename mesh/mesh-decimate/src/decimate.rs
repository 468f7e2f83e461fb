//! Spatial-merge decimation.
//!
//! Each input vertex is compared against every vertex kept so far; the first
//! kept vertex within the merge distance absorbs it. The old→new mapping is a
//! dense array indexed by input vertex, and triangles are rebuilt through it.

// Vertex counts fit in u32 because face indices are u32
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{FusedMesh, Point3, Vector3};
use nalgebra::distance_squared;
use tracing::{debug, info, warn};

use crate::error::DecimateResult;
use crate::params::{DecimateParams, NormalPolicy};
use crate::result::DecimationResult;

/// Decimate a mesh by merging vertices that lie within the merge distance
/// of an earlier kept vertex.
///
/// Output vertices keep their input order. Triangles whose corners collapse
/// onto fewer than three distinct vertices are dropped, as are triangles
/// referencing vertices that do not exist. Running this again on its own
/// output with the same params merges nothing. A merge distance that is not
/// strictly positive (including NaN) merges nothing either; use
/// [`DecimateParams::validate`] to reject such params up front.
///
/// Cost is O(kept × input) distance checks.
///
/// # Example
///
/// ```
/// use mesh_decimate::{decimate_mesh, DecimateParams};
/// use mesh_types::{FusedMesh, Point3};
///
/// let mesh = FusedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(1.0, 0.001, 0.0), // within 2 cm of vertex 1
///     ],
///     vec![[0, 1, 2], [0, 3, 2]],
///     Vec::new(),
/// );
///
/// let result = decimate_mesh(&mesh, &DecimateParams::default());
/// assert_eq!(result.final_vertices, 3);
/// assert_eq!(result.mesh.faces, vec![[0, 1, 2], [0, 1, 2]]);
/// println!("{result}");
/// ```
#[must_use]
pub fn decimate_mesh(mesh: &FusedMesh, params: &DecimateParams) -> DecimationResult {
    let original_vertices = mesh.vertices.len();
    let original_triangles = mesh.faces.len();
    let threshold_sq = if params.distance_threshold > 0.0 {
        params.distance_threshold * params.distance_threshold
    } else {
        warn!(
            threshold = params.distance_threshold,
            "Non-positive merge distance; nothing will merge"
        );
        0.0
    };
    let keep_normals = params.normal_policy == NormalPolicy::Keep
        && !mesh.normals.is_empty()
        && mesh.normals.len() == original_vertices;

    debug!(
        vertices = original_vertices,
        triangles = original_triangles,
        threshold = params.distance_threshold,
        "Starting spatial merge"
    );

    let mut kept: Vec<Point3<f64>> = Vec::new();
    let mut kept_normals: Vec<Vector3<f64>> = Vec::new();
    let mut remap: Vec<u32> = Vec::with_capacity(original_vertices);

    for (i, vertex) in mesh.vertices.iter().enumerate() {
        let existing = kept
            .iter()
            .position(|k| distance_squared(k, vertex) < threshold_sq);

        let new_index = existing.unwrap_or_else(|| {
            kept.push(*vertex);
            if keep_normals {
                kept_normals.push(mesh.normals[i]);
            }
            kept.len() - 1
        });
        remap.push(new_index as u32);
    }

    let (faces, dropped) = rebuild_faces(&mesh.faces, &remap);

    let result = DecimationResult {
        original_vertices,
        final_vertices: kept.len(),
        original_triangles,
        final_triangles: faces.len(),
        dropped_triangles: dropped,
        distance_threshold: params.distance_threshold,
        mesh: FusedMesh::from_parts(kept, faces, kept_normals),
    };

    info!(
        vertices_before = result.original_vertices,
        vertices_after = result.final_vertices,
        triangles_after = result.final_triangles,
        dropped = result.dropped_triangles,
        "Spatial merge complete"
    );

    result
}

/// Validate params, then decimate.
///
/// # Errors
///
/// Returns [`DecimateError::InvalidThreshold`](crate::DecimateError) if the
/// merge distance is not positive and finite.
pub fn try_decimate_mesh(mesh: &FusedMesh, params: &DecimateParams) -> DecimateResult<DecimationResult> {
    params.validate()?;
    Ok(decimate_mesh(mesh, params))
}

/// Map faces through `remap`, dropping degenerate or out-of-range ones.
fn rebuild_faces(faces: &[[u32; 3]], remap: &[u32]) -> (Vec<[u32; 3]>, usize) {
    let mut rebuilt = Vec::with_capacity(faces.len());
    let mut dropped = 0;

    for face in faces {
        let mapped = [
            remap.get(face[0] as usize),
            remap.get(face[1] as usize),
            remap.get(face[2] as usize),
        ];
        match mapped {
            [Some(&a), Some(&b), Some(&c)] if a != b && b != c && a != c => {
                rebuilt.push([a, b, c]);
            }
            _ => dropped += 1,
        }
    }

    (rebuilt, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecimateError;

    /// An `n × n` vertex grid in the z = 0 plane.
    fn grid(n: u32, spacing: f64) -> FusedMesh {
        let mut mesh = FusedMesh::new();
        for y in 0..n {
            for x in 0..n {
                mesh.vertices
                    .push(Point3::new(f64::from(x) * spacing, f64::from(y) * spacing, 0.0));
                mesh.normals.push(Vector3::z());
            }
        }
        for y in 0..n - 1 {
            for x in 0..n - 1 {
                let i = y * n + x;
                mesh.faces.push([i, i + 1, i + n]);
                mesh.faces.push([i + 1, i + n + 1, i + n]);
            }
        }
        mesh
    }

    #[test]
    fn test_decimate_empty_mesh() {
        let result = decimate_mesh(&FusedMesh::new(), &DecimateParams::default());
        assert_eq!(result.final_vertices, 0);
        assert_eq!(result.final_triangles, 0);
        assert!(!result.was_decimated());
    }

    #[test]
    fn test_non_positive_threshold_merges_nothing() {
        let mesh = grid(5, 0.001);
        for threshold in [-0.05, 0.0, f64::NAN] {
            let result = decimate_mesh(&mesh, &DecimateParams::with_threshold(threshold));
            assert_eq!(result.mesh, mesh);
            assert!(!result.was_decimated());
        }
        // A positive threshold of the same magnitude does merge.
        let merged = decimate_mesh(&mesh, &DecimateParams::with_threshold(0.05));
        assert!(merged.was_decimated());
    }

    #[test]
    fn test_sparse_mesh_is_untouched() {
        let mesh = grid(4, 1.0);
        let result = decimate_mesh(&mesh, &DecimateParams::default());
        assert_eq!(result.mesh, mesh);
        assert_eq!(result.dropped_triangles, 0);
    }

    #[test]
    fn test_dense_grid_collapses() {
        let mesh = grid(10, 0.005);
        let result = decimate_mesh(&mesh, &DecimateParams::default());

        assert!(result.final_vertices < result.original_vertices);
        assert!(result.mesh.validate().is_ok());
        assert_eq!(result.mesh.normals.len(), result.final_vertices);
        for face in &result.mesh.faces {
            assert!(face[0] != face[1] && face[1] != face[2] && face[0] != face[2]);
        }
        assert_eq!(
            result.final_triangles + result.dropped_triangles,
            result.original_triangles
        );
    }

    #[test]
    fn test_first_kept_vertex_wins() {
        // Vertex 2 is within range of both 0 and 1; it joins 0.
        let mesh = FusedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.03, 0.0, 0.0),
                Point3::new(0.015, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 3], [2, 1, 3]],
            vec![Vector3::x(), Vector3::y(), Vector3::z(), Vector3::z()],
        );
        let result = decimate_mesh(&mesh, &DecimateParams::default());

        assert_eq!(result.final_vertices, 3);
        assert_eq!(result.mesh.faces, vec![[0, 1, 2], [0, 1, 2]]);
        assert_eq!(result.mesh.normals, vec![Vector3::x(), Vector3::y(), Vector3::z()]);
    }

    #[test]
    fn test_normal_policy_drop() {
        let params = DecimateParams::default().with_normal_policy(NormalPolicy::Drop);
        let result = decimate_mesh(&grid(5, 0.005), &params);
        assert!(!result.mesh.has_normals());
    }

    #[test]
    fn test_mismatched_normals_are_not_carried() {
        let mut mesh = grid(3, 1.0);
        mesh.normals.truncate(2);
        let result = decimate_mesh(&mesh, &DecimateParams::default());
        assert!(!result.mesh.has_normals());
        assert!(result.mesh.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_faces_are_dropped() {
        let mut mesh = grid(2, 1.0);
        mesh.faces.push([0, 1, 42]);
        let result = decimate_mesh(&mesh, &DecimateParams::default());
        assert_eq!(result.dropped_triangles, 1);
        assert!(result.mesh.validate().is_ok());
    }

    #[test]
    fn test_redecimation_is_stable() {
        let params = DecimateParams::default();
        let once = decimate_mesh(&grid(12, 0.007), &params);
        let twice = decimate_mesh(&once.mesh, &params);
        assert_eq!(twice.mesh, once.mesh);
        assert!(!twice.was_decimated());
    }

    #[test]
    fn test_try_decimate_validates() {
        let err = try_decimate_mesh(&grid(2, 1.0), &DecimateParams::with_threshold(0.0));
        assert!(matches!(err, Err(DecimateError::InvalidThreshold(_))));
    }
}
