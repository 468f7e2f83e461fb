//! Wavefront OBJ export.
//!
//! The layout is fixed:
//!
//! ```text
//! # Fused mesh export
//! # Vertices: N
//! # Faces: M
//!
//! v x y z        (N lines)
//! vn x y z       (one per normal, if any)
//! f a//a b//b c//c   (M lines, 1-based; `f a b c` without normals)
//! ```
//!
//! Normals are stored per vertex, so faces reuse the vertex index for the
//! normal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::FusedMesh;
use tracing::debug;

use crate::error::IoResult;

/// Write a mesh as OBJ text.
///
/// # Errors
///
/// Returns an error if the mesh fails validation or the writer fails.
pub fn write_obj<W: Write>(mesh: &FusedMesh, writer: &mut W) -> IoResult<()> {
    mesh.validate()?;

    writeln!(writer, "# Fused mesh export")?;
    writeln!(writer, "# Vertices: {}", mesh.vertices.len())?;
    writeln!(writer, "# Faces: {}", mesh.faces.len())?;
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    let with_normals = mesh.has_normals();
    for &[a, b, c] in &mesh.faces {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        if with_normals {
            writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
        } else {
            writeln!(writer, "f {a} {b} {c}")?;
        }
    }

    Ok(())
}

/// Render a mesh as an OBJ string.
///
/// # Errors
///
/// Returns an error if the mesh fails validation.
///
/// # Example
///
/// ```
/// use mesh_io::obj_string;
/// use mesh_types::{FusedMesh, Point3};
///
/// let mesh = FusedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
///     Vec::new(),
/// );
/// let text = obj_string(&mesh).unwrap();
/// assert!(text.ends_with("f 1 2 3\n"));
/// ```
pub fn obj_string(mesh: &FusedMesh) -> IoResult<String> {
    let mut buf = Vec::new();
    write_obj(mesh, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Save a mesh to an OBJ file.
///
/// # Errors
///
/// Returns an error if the mesh fails validation or the file cannot be
/// written.
pub fn save_obj<P: AsRef<Path>>(mesh: &FusedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), vertices = mesh.vertices.len(), "Saved OBJ");
    Ok(())
}
