//! API Regression Tests for the scan fusion crates
//!
//! These tests pin down the public API and the observable behaviour that
//! downstream consumers rely on. They are organized in 3 tiers:
//!
//! - Tier 1: Foundation (mesh-types, mesh-transform)
//! - Tier 2: Fusion (mesh-decimate, mesh-fuse)
//! - Tier 3: Export (mesh-io)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use mesh::{prelude::*, types};
use types::{Matrix4, Point3, Vector3};

fn triangle() -> MeshFragment {
    MeshFragment::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
}

// =============================================================================
// TIER 1: Foundation - Basic Types and Transforms
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn fused_mesh_construction() {
        let mesh = FusedMesh::new();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.is_empty());

        let mesh = FusedMesh::from_parts(triangle().vertices, vec![[0, 1, 2]], Vec::new());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices().len(), 3);
    }

    #[test]
    fn bounds_calculation() {
        let mesh = FusedMesh::from_parts(
            vec![Point3::new(-1.0, 2.0, 0.5), Point3::new(3.0, -2.0, 1.5)],
            Vec::new(),
            Vec::new(),
        );
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Point3::new(-1.0, -2.0, 0.5));
        assert_eq!(bounds.max, Point3::new(3.0, 2.0, 1.5));
        assert!(FusedMesh::new().bounds_opt().is_none());
    }

    #[test]
    fn transform_normals() {
        let t = Transform3D::scale(1.0, 4.0, 1.0);
        let n = t.transform_normal(&Vector3::y()).unwrap();
        assert_relative_eq!(n, Vector3::y(), epsilon = 1e-12);
    }
}

// =============================================================================
// TIER 2: Fusion - Decimation and Fragment Merging
// =============================================================================

mod tier2_fusion {
    use super::*;

    #[test]
    fn zero_fragments_yield_no_mesh() {
        assert!(fuse_fragments(&[], &FuseParams::default()).is_none());
    }

    #[test]
    fn identity_fragment_round_trips() {
        let fragment = triangle();
        let mesh = fuse_fragments(std::slice::from_ref(&fragment), &FuseParams::default()).unwrap();
        assert_eq!(mesh.vertices, fragment.vertices);
        assert_eq!(mesh.faces, fragment.faces);
        assert_eq!(mesh.bounds(), fragment.bounds());
    }

    #[test]
    fn two_fragments_shift_second_indices() {
        let moved = triangle().with_transform(Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)));
        let mesh = fuse_fragments(&[moved, triangle()], &FuseParams::default()).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
        assert_eq!(mesh.faces[1], [3, 4, 5]);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn decimate_params_presets() {
        assert_relative_eq!(DecimateParams::default().distance_threshold, 0.02);
        assert!(DecimateParams::fine().validate().is_ok());
        assert!(DecimateParams::coarse().validate().is_ok());
        assert_eq!(
            DecimateParams::default().normal_policy,
            NormalPolicy::Keep
        );
    }

    #[test]
    fn detailed_result_display() {
        let result = fuse_fragments_detailed(&[triangle()], &FuseParams::default()).unwrap();
        assert!(result.to_string().starts_with("Fusion: 1 fragments"));
    }
}

// =============================================================================
// TIER 3: Export - OBJ and Payload
// =============================================================================

mod tier3_export {
    use super::*;

    #[test]
    fn obj_header_and_faces() {
        let mesh = fuse_fragments(&[triangle()], &FuseParams::default()).unwrap();
        let text = obj_string(&mesh).unwrap();
        assert!(text.starts_with("# Fused mesh export\n# Vertices: 3\n# Faces: 1\n\n"));
        assert!(text.ends_with("f 1 2 3\n"));
    }

    #[test]
    fn payload_contract_keys() {
        let mesh = fuse_fragments(&[triangle()], &FuseParams::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&mesh).unwrap()).unwrap();
        for key in ["vertices", "faces", "normals", "bounds"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["bounds"].get("min").is_some());
        assert!(value["bounds"].get("max").is_some());
    }
}
