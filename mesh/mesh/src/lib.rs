//! Mesh toolkit for room-scale scan fusion.
//!
//! This umbrella crate re-exports the mesh-* crates used to turn AR mesh
//! fragments into one consolidated, size-bounded world mesh and export it.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! let fragments: Vec<MeshFragment> = Vec::new();
//!
//! // Fuse into world space, decimating to the vertex budget
//! if let Some(mesh) = fuse_fragments(&fragments, &FuseParams::default()) {
//!     println!("room bounds: {:?}", mesh.bounds());
//!     mesh::io::save_obj(&mesh, "room.obj").unwrap();
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `MeshFragment`, `FusedMesh`, `Aabb`
//! - [`transform`] - Local-to-world transforms and normal matrices
//! - [`decimate`] - Spatial-merge decimation
//! - [`fuse`] - Fragment fusion under a vertex budget
//! - [`io`] - OBJ and JSON payload export

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `MeshFragment`, `FusedMesh`, `Aabb`.
pub use mesh_types as types;

/// Local-to-world transforms and normal matrices.
pub use mesh_transform as transform;

/// Spatial-merge decimation.
pub use mesh_decimate as decimate;

/// Fragment fusion under a vertex budget.
pub use mesh_fuse as fuse;

/// OBJ and JSON payload export.
pub use mesh_io as io;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for scan fusion.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, FusedMesh, MeshBounds, MeshFragment, MeshTopology};

    // Transform
    pub use mesh_transform::Transform3D;

    // Decimation and fusion
    pub use mesh_decimate::{DecimateParams, NormalPolicy, decimate_mesh};
    pub use mesh_fuse::{FuseParams, FusionResult, fuse_fragments, fuse_fragments_detailed};

    // Export
    pub use mesh_io::{MeshPayload, obj_string, save_json, save_obj, to_json};
}

// =============================================================================
// Tests
// =============================================================================
