//! Dense vertex numbering of the valid DSM cells.

use crate::raster::HeightGrid;

/// Per-cell vertex numbering derived from a [`HeightGrid`].
///
/// Valid cells are numbered `0..vertex_count()` in row-major scan order,
/// holes hold `None`. The scan order here is the order in which vertices
/// are written, so the number of a cell is its position in the vertex list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexIndexGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
    vertex_count: usize,
}

impl VertexIndexGrid {
    /// Scans `heights` once and assigns the next free index to every finite cell.
    pub fn from_heights(heights: &HeightGrid) -> Self {
        let mut vertex_count = 0;
        let cells = heights
            .values()
            .iter()
            .map(|h| {
                if h.is_finite() {
                    vertex_count += 1;
                    Some(vertex_count - 1)
                } else {
                    None
                }
            })
            .collect();
        log::debug!(
            "indexed {} vertices in a {}x{} grid",
            vertex_count,
            heights.width(),
            heights.height()
        );
        Self {
            width: heights.width(),
            height: heights.height(),
            cells,
            vertex_count,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Vertex index at (`row`, `col`), `None` for holes and out-of-grid cells.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            None
        }
    }

    /// Iterates `(row, col, index)` for every vertex in index order.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(pos, cell)| cell.map(|idx| (pos / width, pos % width, idx)))
    }
}
