//! Raster input, PLY output and run summaries.

pub mod asc;
pub mod grid;
pub mod ply;

use std::fs::File;
use std::io::{self, Read, Write};

use crate::error::Result;
use crate::mesh::MeshSummary;

/// Reads a file to string.
pub fn read_to_string(path: &str) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes a string to a file, replacing any previous content.
pub fn write_string(path: &str, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Writes a run summary as pretty printed JSON.
pub fn write_summary_json(path: &str, summary: &MeshSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    write_string(path, &json)?;
    Ok(())
}
