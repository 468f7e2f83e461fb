//! Error types for mesh invariant checks.

use thiserror::Error;

/// Invariant violations detected on a [`FusedMesh`](crate::FusedMesh).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Face index.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Normals are present but do not line up with the vertices.
    #[error("normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch {
        /// Number of normals.
        normals: usize,
        /// Number of vertices.
        vertices: usize,
    },
}

/// Result type for mesh invariant checks.
pub type MeshResult<T> = std::result::Result<T, MeshError>;
