//! Fuse per-anchor mesh fragments into a single world-space mesh.
//!
//! AR sessions deliver geometry as many small fragments, each in its own
//! local frame with a local-to-world transform. This crate moves them into
//! the world frame, concatenates them with re-indexed faces, and keeps the
//! result under a vertex budget by spatial-merge decimation.
//!
//! # Example
//!
//! ```
//! use mesh_fuse::{fuse_fragments_detailed, FuseParams};
//! use mesh_types::{MeshFragment, Point3};
//!
//! let fragment = MeshFragment::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! let result = fuse_fragments_detailed(&[fragment], &FuseParams::default()).unwrap();
//! println!("{result}");
//! assert_eq!(result.mesh.indices(), &[0, 1, 2]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod fuse;
mod params;
mod result;

pub use error::{FuseError, FuseResult};
pub use fuse::{fuse_fragments, fuse_fragments_detailed};
pub use params::{DEFAULT_MAX_DECIMATION_PASSES, DEFAULT_MAX_VERTICES, FuseParams};
pub use result::FusionResult;
