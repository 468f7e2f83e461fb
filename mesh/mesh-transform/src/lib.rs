//! Rigid and affine transforms for moving fragment geometry into the world
//! frame.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero platform dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_transform::Transform3D;
//! use nalgebra::Point3;
//!
//! let transform = Transform3D::translation(1.0, 2.0, 3.0);
//! let p = transform.transform_point(&Point3::origin());
//! assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod transform;

pub use error::{TransformError, TransformResult};
pub use transform::Transform3D;
