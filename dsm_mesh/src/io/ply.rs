//! PLY writer for grid meshes.
//!
//! The header is written first from the precomputed counts, then one record
//! per vertex and one record per quad. Record counts are checked against the
//! header after each block.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::{MeshError, Result};
use crate::mesh::{GridMesh, MeshSummary, MeshVertex};

/// Body encoding of the PLY stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlyEncoding {
    #[default]
    Ascii,
    BinaryLittleEndian,
}

impl PlyEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            PlyEncoding::Ascii => "ascii",
            PlyEncoding::BinaryLittleEndian => "binary_little_endian",
        }
    }
}

/// Writes `mesh` to `writer` and returns what was written.
pub fn write_ply<W: Write>(
    mesh: &GridMesh<'_>,
    writer: &mut W,
    encoding: PlyEncoding,
) -> Result<MeshSummary> {
    write_header(mesh, writer, encoding)?;

    let mut written = 0;
    for vertex in mesh.vertices() {
        match encoding {
            PlyEncoding::Ascii => write_vertex_ascii(writer, &vertex)?,
            PlyEncoding::BinaryLittleEndian => write_vertex_binary(writer, &vertex)?,
        }
        written += 1;
    }
    check_count("vertex", mesh.vertex_count(), written)?;

    let mut written = 0;
    for quad in mesh.faces() {
        match encoding {
            PlyEncoding::Ascii => {
                writeln!(writer, "4 {} {} {} {}", quad[0], quad[1], quad[2], quad[3])?;
            }
            PlyEncoding::BinaryLittleEndian => {
                writer.write_all(&[4u8])?;
                for idx in quad {
                    writer.write_all(&binary_index(idx)?.to_le_bytes())?;
                }
            }
        }
        written += 1;
    }
    check_count("face", mesh.face_count(), written)?;
    writer.flush()?;

    log::info!(
        "wrote {} vertices and {} faces ({})",
        mesh.vertex_count(),
        mesh.face_count(),
        encoding.as_str()
    );
    Ok(MeshSummary {
        width: mesh.heights().width(),
        height: mesh.heights().height(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        colored: mesh.has_colors(),
        encoding: encoding.as_str().to_string(),
    })
}

/// Writes `mesh` to a PLY file at `path`.
pub fn save_ply(mesh: &GridMesh<'_>, path: &str, encoding: PlyEncoding) -> Result<MeshSummary> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ply(mesh, &mut writer, encoding)
}

fn write_header<W: Write>(
    mesh: &GridMesh<'_>,
    writer: &mut W,
    encoding: PlyEncoding,
) -> Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format {} 1.0", encoding.as_str())?;
    writeln!(writer, "comment created by dsm_mesh")?;
    writeln!(writer, "element vertex {}", mesh.vertex_count())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    if mesh.has_colors() {
        writeln!(writer, "property uchar red")?;
        writeln!(writer, "property uchar green")?;
        writeln!(writer, "property uchar blue")?;
    }
    writeln!(writer, "element face {}", mesh.face_count())?;
    writeln!(writer, "property list uchar int vertex_index")?;
    writeln!(writer, "end_header")?;
    Ok(())
}

fn write_vertex_ascii<W: Write>(writer: &mut W, vertex: &MeshVertex) -> Result<()> {
    let p = vertex.position;
    write!(writer, "{:.16} {:.16} {:.16}", p.x, p.y, p.z)?;
    if let Some([r, g, b]) = vertex.color {
        write!(writer, " {} {} {}", r, g, b)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_vertex_binary<W: Write>(writer: &mut W, vertex: &MeshVertex) -> Result<()> {
    for c in vertex.position.to_array() {
        writer.write_all(&(c as f32).to_le_bytes())?;
    }
    if let Some(rgb) = vertex.color {
        writer.write_all(&rgb)?;
    }
    Ok(())
}

fn binary_index(idx: usize) -> Result<i32> {
    i32::try_from(idx).map_err(|_| {
        MeshError::invalid_raster(format!("vertex index {idx} does not fit a PLY int"))
    })
}

fn check_count(element: &'static str, declared: usize, written: usize) -> Result<()> {
    if declared != written {
        log::error!(
            "{} count mismatch: declared {}, wrote {}",
            element,
            declared,
            written
        );
        return Err(MeshError::CountMismatch {
            element,
            declared,
            written,
        });
    }
    Ok(())
}
