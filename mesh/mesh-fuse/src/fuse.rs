//! Concatenate fragments in world space and enforce the vertex budget.

// Vertex counts fit in u32 because face indices are u32
#![allow(clippy::cast_possible_truncation)]

use mesh_decimate::decimate_mesh;
use mesh_transform::Transform3D;
use mesh_types::{FusedMesh, MeshFragment, Vector3};
use nalgebra::Matrix3;
use tracing::{debug, info, warn};

use crate::params::FuseParams;
use crate::result::FusionResult;

/// Fuse fragments into one world-space mesh.
///
/// Returns `None` when there are no fragments or none of them has any
/// vertices. See [`fuse_fragments_detailed`] for statistics.
///
/// # Example
///
/// ```
/// use mesh_fuse::{fuse_fragments, FuseParams};
/// use mesh_types::{Matrix4, MeshFragment, Point3, Vector3};
///
/// let tri = MeshFragment::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// let moved = tri
///     .clone()
///     .with_transform(Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)));
///
/// let mesh = fuse_fragments(&[moved, tri], &FuseParams::default()).unwrap();
/// assert_eq!(mesh.vertices.len(), 6);
/// assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
///
/// assert!(fuse_fragments(&[], &FuseParams::default()).is_none());
/// ```
#[must_use]
pub fn fuse_fragments(fragments: &[MeshFragment], params: &FuseParams) -> Option<FusedMesh> {
    fuse_fragments_detailed(fragments, params).map(|result| result.mesh)
}

/// Fuse fragments and report what happened.
///
/// 1. Each fragment's positions are transformed homogeneously (w = 1) and
///    appended in input order.
/// 2. Normals are transformed by the inverse-transpose of the linear part
///    and re-normalized. They are kept only if every contributing fragment
///    has one normal per vertex and an invertible linear part; otherwise the
///    result has no normals at all.
/// 3. Faces are shifted by the running vertex offset. Faces referencing
///    vertices outside their own fragment are skipped.
/// 4. Over budget, the mesh is decimated; if still over budget the merge
///    distance doubles and the pass repeats, up to
///    [`FuseParams::max_decimation_passes`].
///
/// `params` are not validated here; call [`FuseParams::validate`] first. A
/// non-positive merge distance merges nothing, so the budget is not met.
#[must_use]
pub fn fuse_fragments_detailed(
    fragments: &[MeshFragment],
    params: &FuseParams,
) -> Option<FusionResult> {
    let input_vertices: usize = fragments.iter().map(|f| f.vertices.len()).sum();
    if input_vertices == 0 {
        debug!(fragments = fragments.len(), "No vertices to fuse");
        return None;
    }

    let normal_matrices = collect_normal_matrices(fragments);
    let normals_kept = normal_matrices.is_some();
    if !normals_kept {
        warn!("Not every fragment has usable normals; fused mesh will carry none");
    }

    let face_capacity: usize = fragments.iter().map(|f| f.faces.len()).sum();
    let mut mesh = FusedMesh::with_capacity(input_vertices, face_capacity, normals_kept);
    let mut vertex_offset = 0u32;
    let mut skipped_triangles = 0;
    let mut fragments_used = 0;

    for (idx, fragment) in fragments.iter().enumerate() {
        if fragment.vertices.is_empty() {
            continue;
        }
        fragments_used += 1;

        let transform = Transform3D::from_matrix(fragment.transform);
        mesh.vertices
            .extend(fragment.vertices.iter().map(|p| transform.transform_point(p)));

        if let (Some(matrices), Some(normals)) = (&normal_matrices, fragment.usable_normals()) {
            let m = matrices[fragments_used - 1];
            mesh.normals.extend(normals.iter().map(|n| world_normal(&m, n)));
        }

        let before = skipped_triangles;
        for face in &fragment.faces {
            if !fragment.face_in_range(face) {
                skipped_triangles += 1;
                continue;
            }
            mesh.faces.push([
                face[0] + vertex_offset,
                face[1] + vertex_offset,
                face[2] + vertex_offset,
            ]);
        }

        debug!(
            fragment = idx,
            vertices = fragment.vertices.len(),
            faces = fragment.faces.len(),
            skipped = skipped_triangles - before,
            offset = vertex_offset,
            "Appended fragment"
        );

        vertex_offset += fragment.vertices.len() as u32;
    }

    let (mesh, decimation_passes, final_threshold) = enforce_budget(mesh, params);

    let result = FusionResult {
        mesh,
        fragments_used,
        input_vertices,
        skipped_triangles,
        normals_kept: normals_kept && !decimation_dropped_normals(params, decimation_passes),
        decimation_passes,
        final_threshold,
    };
    info!(
        fragments = result.fragments_used,
        input_vertices = result.input_vertices,
        vertices = result.mesh.vertices.len(),
        triangles = result.mesh.faces.len(),
        passes = result.decimation_passes,
        "Fused mesh"
    );
    Some(result)
}

/// One normal matrix per contributing fragment, or `None` if any of them
/// cannot supply world-space normals.
fn collect_normal_matrices(fragments: &[MeshFragment]) -> Option<Vec<Matrix3<f64>>> {
    fragments
        .iter()
        .filter(|f| !f.vertices.is_empty())
        .map(|f| {
            f.usable_normals()?;
            Transform3D::from_matrix(f.transform).normal_matrix().ok()
        })
        .collect()
}

/// Transform and re-normalize; a zero-length result stays zero so the
/// vertex/normal correspondence holds.
fn world_normal(normal_matrix: &Matrix3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    (normal_matrix * normal)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

fn decimation_dropped_normals(params: &FuseParams, passes: u32) -> bool {
    passes > 0 && params.decimation.normal_policy == mesh_decimate::NormalPolicy::Drop
}

/// Decimate with a doubling merge distance until the mesh fits.
fn enforce_budget(mut mesh: FusedMesh, params: &FuseParams) -> (FusedMesh, u32, Option<f64>) {
    let mut decimation = params.decimation.clone();
    let mut passes = 0;
    let mut final_threshold = None;

    while mesh.vertices.len() > params.max_vertices && passes < params.max_decimation_passes {
        let result = decimate_mesh(&mesh, &decimation);
        debug!(pass = passes, "{result}");
        mesh = result.mesh;
        passes += 1;
        final_threshold = Some(decimation.distance_threshold);
        decimation = decimation.scaled(2.0);
    }

    if mesh.vertices.len() > params.max_vertices {
        warn!(
            vertices = mesh.vertices.len(),
            budget = params.max_vertices,
            passes,
            "Vertex budget not reached"
        );
    }

    (mesh, passes, final_threshold)
}
