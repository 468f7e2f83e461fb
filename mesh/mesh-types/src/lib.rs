//! Core mesh types for world-frame surface fusion.
//!
//! This crate provides the foundational types shared by the fusion pipeline:
//!
//! - [`MeshFragment`] - A local mesh buffer with its local-to-world transform
//! - [`FusedMesh`] - A consolidated world-space triangle mesh
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! No platform or rendering dependencies. Fragments are plain buffers handed
//! over by whatever tracking layer produced them.
//!
//! # Units
//!
//! All coordinates are `f64` in the world frame of the tracking session
//! (metres for AR sessions). Nothing in this crate assumes a unit.
//!
//! # Example
//!
//! ```
//! use mesh_types::{FusedMesh, MeshBounds, MeshTopology, Point3};
//!
//! let mut mesh = FusedMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.indices(), &[0, 1, 2]);
//! assert!(mesh.bounds().contains(&Point3::new(0.5, 0.5, 0.0)));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod error;
mod fragment;
mod mesh;
mod traits;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use fragment::MeshFragment;
pub use mesh::FusedMesh;
pub use traits::{MeshBounds, MeshTopology};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
