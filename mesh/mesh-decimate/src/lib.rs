//! Mesh simplification by spatial vertex merging.
//!
//! Fused scans contain many nearly coincident vertices where fragments
//! overlap. This crate collapses them: every vertex within a merge distance
//! of an earlier kept vertex is folded into it, and triangles are rebuilt
//! through the resulting index map.
//!
//! # Features
//!
//! - **Order-preserving**: kept vertices stay in input order
//! - **Topology-safe**: degenerate and out-of-range triangles are dropped
//! - **Idempotent**: a second pass at the same distance changes nothing
//! - **Normal policy**: carry normals with kept vertices or drop them
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with zero platform dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_decimate::{decimate_mesh, DecimateParams};
//! use mesh_types::{FusedMesh, Point3};
//!
//! let mesh = FusedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(0.01, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 2, 3], [1, 2, 3]],
//!     Vec::new(),
//! );
//!
//! let result = decimate_mesh(&mesh, &DecimateParams::default());
//! assert_eq!(result.final_vertices, 3);
//! println!("{}", result);
//!
//! // Coarser merging for previews
//! let coarse = decimate_mesh(&mesh, &DecimateParams::coarse());
//! println!("Coarse: {}", coarse);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod decimate;
mod error;
mod params;
mod result;

// Re-export main types and functions
pub use decimate::{decimate_mesh, try_decimate_mesh};
pub use error::{DecimateError, DecimateResult};
pub use params::{DEFAULT_DISTANCE_THRESHOLD, DecimateParams, NormalPolicy};
pub use result::DecimationResult;
