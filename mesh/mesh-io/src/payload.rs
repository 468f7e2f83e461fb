//! Structured mesh export.
//!
//! The payload is a flat, language-neutral map. Its key names are a contract
//! with consumers and must not change:
//!
//! ```json
//! {
//!   "vertices": [x0, y0, z0, x1, ...],
//!   "faces":    [a0, b0, c0, a1, ...],
//!   "normals":  [nx0, ny0, nz0, ...],
//!   "bounds":   { "min": [x, y, z], "max": [x, y, z] }
//! }
//! ```
//!
//! An empty mesh exports zero bounds.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{FusedMesh, MeshBounds, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, IoResult};

/// Bounding box as plain triples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsPayload {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

/// Flat export form of a [`FusedMesh`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPayload {
    /// Flat `x, y, z` positions.
    pub vertices: Vec<f64>,
    /// Flat triangle indices.
    pub faces: Vec<u32>,
    /// Flat `x, y, z` normals; empty if the mesh has none.
    pub normals: Vec<f64>,
    /// Bounds of `vertices`.
    pub bounds: BoundsPayload,
}

impl MeshPayload {
    /// Build the payload for a mesh.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidMesh`] if the mesh fails validation.
    pub fn from_mesh(mesh: &FusedMesh) -> IoResult<Self> {
        mesh.validate()?;
        let (min, max) = mesh.bounds().to_arrays();
        Ok(Self {
            vertices: mesh.positions_flat(),
            faces: mesh.indices().to_vec(),
            normals: mesh.normals_flat(),
            bounds: BoundsPayload { min, max },
        })
    }

    /// Rebuild a mesh from the flat arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if an array length is not a multiple of three or
    /// the rebuilt mesh fails validation.
    pub fn to_mesh(&self) -> IoResult<FusedMesh> {
        let vertices = triples(&self.vertices, "vertices")?
            .map(|[x, y, z]| Point3::new(x, y, z))
            .collect();
        let normals = triples(&self.normals, "normals")?
            .map(|[x, y, z]| Vector3::new(x, y, z))
            .collect();
        let faces = triples(&self.faces, "faces")?.collect();

        let mesh = FusedMesh::from_parts(vertices, faces, normals);
        mesh.validate()?;
        Ok(mesh)
    }
}

fn triples<'a, T: Copy>(
    values: &'a [T],
    name: &str,
) -> IoResult<impl Iterator<Item = [T; 3]> + 'a> {
    if values.len() % 3 != 0 {
        return Err(IoError::invalid_content(format!(
            "{name} length {} is not a multiple of 3",
            values.len()
        )));
    }
    Ok(values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]))
}

/// Serialize a mesh payload to a JSON string.
///
/// # Errors
///
/// Returns an error if the mesh fails validation.
///
/// # Example
///
/// ```
/// use mesh_io::to_json;
/// use mesh_types::FusedMesh;
///
/// let json = to_json(&FusedMesh::new()).unwrap();
/// assert_eq!(
///     json,
///     r#"{"vertices":[],"faces":[],"normals":[],"bounds":{"min":[0.0,0.0,0.0],"max":[0.0,0.0,0.0]}}"#
/// );
/// ```
pub fn to_json(mesh: &FusedMesh) -> IoResult<String> {
    Ok(serde_json::to_string(&MeshPayload::from_mesh(mesh)?)?)
}

/// Serialize a mesh payload to JSON bytes.
///
/// # Errors
///
/// Returns an error if the mesh fails validation.
pub fn to_json_vec(mesh: &FusedMesh) -> IoResult<Vec<u8>> {
    Ok(serde_json::to_vec(&MeshPayload::from_mesh(mesh)?)?)
}

/// Write a mesh payload as JSON.
///
/// # Errors
///
/// Returns an error if the mesh fails validation or the writer fails.
pub fn write_json<W: Write>(mesh: &FusedMesh, writer: W) -> IoResult<()> {
    serde_json::to_writer(writer, &MeshPayload::from_mesh(mesh)?)?;
    Ok(())
}

/// Save a mesh payload to a JSON file.
///
/// # Errors
///
/// Returns an error if the mesh fails validation or the file cannot be
/// written.
pub fn save_json<P: AsRef<Path>>(mesh: &FusedMesh, path: P) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Parse a payload from JSON.
///
/// # Errors
///
/// Returns an error if the JSON does not match the payload layout.
pub fn from_json(json: &str) -> IoResult<MeshPayload> {
    Ok(serde_json::from_str(json)?)
}
