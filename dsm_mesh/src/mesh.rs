//! Mesh assembly: ties the height grid, the optional colors and the vertex
//! numbering together and exposes vertices and quads in writing order.

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};
use crate::faces::{count_quads, quads, Quad};
use crate::geometry::{grid_to_model, Point3};
use crate::index::VertexIndexGrid;
use crate::raster::{ColorGrid, HeightGrid, MISSING_COLOR};

/// Tunables for meshing a DSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Grid cells per model unit. Planar coordinates are divided by it.
    pub resolution: f32,
    /// Long triangle filter threshold. Accepted but not applied.
    pub max_edge_length: f32,
    /// Connected component size filter threshold. Accepted but not applied.
    pub min_component_size: f32,
    /// Flip the second axis. Accepted but not applied.
    pub flip_orientation: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_edge_length: f32::INFINITY,
            min_component_size: f32::INFINITY,
            flip_orientation: false,
        }
    }
}

impl MeshOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(MeshError::InvalidResolution(self.resolution));
        }
        Ok(())
    }

    fn warn_inert(&self) {
        if self.max_edge_length.is_finite() {
            log::warn!(
                "long triangle filtering ({}) is not implemented, no faces are removed",
                self.max_edge_length
            );
        }
        if self.min_component_size.is_finite() {
            log::warn!(
                "connected component filtering ({}) is not implemented, no vertices are removed",
                self.min_component_size
            );
        }
        if self.flip_orientation {
            log::warn!("orientation flip is not implemented, axes are left unchanged");
        }
    }
}

/// A vertex ready to be written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Point3,
    pub color: Option<[u8; 3]>,
}

/// Counts reported after a mesh has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub width: usize,
    pub height: usize,
    pub vertices: usize,
    pub faces: usize,
    pub colored: bool,
    pub encoding: String,
}

/// Color of the vertex at (`row`, `col`), magenta when the lookup fails.
fn vertex_color(colors: Option<&ColorGrid>, row: usize, col: usize) -> Option<[u8; 3]> {
    colors.map(|c| c.rgb_at(row, col).unwrap_or(MISSING_COLOR))
}

/// Quad mesh of a DSM with its vertex and face counts known up front.
#[derive(Debug, Clone)]
pub struct GridMesh<'a> {
    heights: &'a HeightGrid,
    colors: Option<&'a ColorGrid>,
    index: VertexIndexGrid,
    face_count: usize,
    resolution: f32,
}

impl<'a> GridMesh<'a> {
    /// Validates the inputs, numbers the vertices and counts the quads.
    pub fn build(
        heights: &'a HeightGrid,
        colors: Option<&'a ColorGrid>,
        options: &MeshOptions,
    ) -> Result<Self> {
        options.validate()?;
        options.warn_inert();
        if let Some(colors) = colors {
            colors.ensure_matches(heights)?;
        }
        let index = VertexIndexGrid::from_heights(heights);
        let face_count = count_quads(&index);
        log::debug!("counted {} quads", face_count);
        Ok(Self {
            heights,
            colors,
            index,
            face_count,
            resolution: options.resolution,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.index.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn heights(&self) -> &HeightGrid {
        self.heights
    }

    /// Vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = MeshVertex> + '_ {
        self.index.vertices().map(move |(row, col, _)| {
            let z = self.heights.get(row, col).unwrap_or(f32::NAN);
            MeshVertex {
                position: grid_to_model(row, col, z, self.resolution),
                color: vertex_color(self.colors, row, col),
            }
        })
    }

    /// Quads in the same order and with the same predicate used for counting.
    pub fn faces(&self) -> impl Iterator<Item = Quad> + '_ {
        quads(&self.index)
    }
}
