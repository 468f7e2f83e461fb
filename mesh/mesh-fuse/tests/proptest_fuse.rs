//! Property-based tests for fragment fusion.
//!
//! These tests use proptest to generate random fragment sets and verify the
//! index and topology invariants of the fused mesh.
//!
//! Run with: cargo test -p mesh-fuse -- proptest

use mesh_decimate::{DecimateParams, decimate_mesh};
use mesh_fuse::{FuseParams, fuse_fragments, fuse_fragments_detailed};
use mesh_types::{Matrix4, MeshFragment, Point3, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating random fragments
// =============================================================================

/// Positions in a 20 cm cube, dense enough that 2 cm merging bites.
fn arb_position() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-0.1..0.1f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn arb_translation() -> impl Strategy<Value = Matrix4<f64>> {
    prop::array::uniform3(-1.0..1.0f64)
        .prop_map(|[x, y, z]| Matrix4::new_translation(&Vector3::new(x, y, z)))
}

/// A fragment whose faces only reference its own vertices.
fn arb_fragment(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = MeshFragment> {
    (3..=max_vertices).prop_flat_map(move |n| {
        let n_u32 = u32::try_from(n).unwrap_or(u32::MAX);
        (
            prop::collection::vec(arb_position(), n),
            prop::collection::vec(prop::array::uniform3(0..n_u32), 0..=max_faces),
            arb_translation(),
        )
            .prop_map(|(vertices, faces, transform)| {
                MeshFragment::new(vertices, faces).with_transform(transform)
            })
    })
}

fn arb_fragments() -> impl Strategy<Value = Vec<MeshFragment>> {
    prop::collection::vec(arb_fragment(40, 60), 1..6)
}

fn is_degenerate(face: &[u32; 3]) -> bool {
    face[0] == face[1] || face[1] == face[2] || face[0] == face[2]
}

// =============================================================================
// Property Tests: Fusion
// =============================================================================

proptest! {
    /// Every fused index refers to an existing vertex.
    #[test]
    fn fused_indices_in_range(fragments in arb_fragments()) {
        let mesh = fuse_fragments(&fragments, &FuseParams::default()).unwrap();
        prop_assert!(mesh.validate().is_ok());
        prop_assert_eq!(mesh.indices().len(), 3 * mesh.faces.len());
    }

    /// Without decimation the vertex count is the sum of the inputs.
    #[test]
    fn vertex_count_is_sum(fragments in arb_fragments()) {
        let total: usize = fragments.iter().map(|f| f.vertices.len()).sum();
        let mesh = fuse_fragments(&fragments, &FuseParams::default()).unwrap();
        prop_assert_eq!(mesh.vertices.len(), total);
    }

    /// Under a tight budget the output fits and stays valid.
    #[test]
    fn decimated_fusion_fits_budget(fragments in arb_fragments(), budget in 1usize..30) {
        let params = FuseParams::default().with_max_vertices(budget);
        let result = fuse_fragments_detailed(&fragments, &params).unwrap();
        prop_assert!(result.mesh.vertices.len() <= budget);
        prop_assert!(result.mesh.validate().is_ok());
    }
}

// =============================================================================
// Property Tests: Decimation
// =============================================================================

proptest! {
    /// Decimation never emits a triangle with repeated corners.
    #[test]
    fn decimation_has_no_degenerate_faces(fragments in arb_fragments()) {
        let mesh = fuse_fragments(&fragments, &FuseParams::default()).unwrap();
        let result = decimate_mesh(&mesh, &DecimateParams::default());
        prop_assert!(result.mesh.validate().is_ok());
        prop_assert!(!result.mesh.faces.iter().any(is_degenerate));
    }

    /// A second pass at the same distance merges nothing.
    #[test]
    fn redecimation_is_idempotent(fragments in arb_fragments()) {
        let mesh = fuse_fragments(&fragments, &FuseParams::default()).unwrap();
        let params = DecimateParams::default();
        let once = decimate_mesh(&mesh, &params);
        let twice = decimate_mesh(&once.mesh, &params);
        prop_assert_eq!(&twice.mesh, &once.mesh);
        prop_assert_eq!(twice.dropped_triangles, 0);
    }
}
