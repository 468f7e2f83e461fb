//! Mesh export for fused scans.
//!
//! Two output forms:
//!
//! - **OBJ** (Wavefront) - ASCII text with a header comment block
//! - **Payload** - a flat map (`vertices`, `faces`, `normals`, `bounds`)
//!   serialized as JSON
//!
//! Both validate the mesh before writing anything.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{save_json, save_obj};
//! use mesh_types::FusedMesh;
//!
//! let mesh = FusedMesh::new();
//! save_obj(&mesh, "room.obj").unwrap();
//! save_json(&mesh, "room.json").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;
mod payload;

pub use error::{IoError, IoResult};
pub use obj::{obj_string, save_obj, write_obj};
pub use payload::{
    BoundsPayload, MeshPayload, from_json, save_json, to_json, to_json_vec, write_json,
};
