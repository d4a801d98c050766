//! Quad faces over 2x2 neighbourhoods of valid cells.

use crate::index::VertexIndexGrid;

/// Four vertex indices of a quad in writing order.
pub type Quad = [usize; 4];

/// Quad whose top-left corner is (`row`, `col`), if all four corners are
/// vertices.
///
/// Corners are listed as (row, col), (row, col+1), (row+1, col+1),
/// (row+1, col). Counting and writing both go through this function so the
/// declared face count always matches the written faces.
pub fn quad_at(grid: &VertexIndexGrid, row: usize, col: usize) -> Option<Quad> {
    Some([
        grid.get(row, col)?,
        grid.get(row, col + 1)?,
        grid.get(row + 1, col + 1)?,
        grid.get(row + 1, col)?,
    ])
}

/// Every quad of the grid, visiting neighbourhoods in row-major order.
pub fn quads(grid: &VertexIndexGrid) -> impl Iterator<Item = Quad> + '_ {
    let rows = grid.height().saturating_sub(1);
    let cols = grid.width().saturating_sub(1);
    (0..rows).flat_map(move |row| (0..cols).filter_map(move |col| quad_at(grid, row, col)))
}

pub fn count_quads(grid: &VertexIndexGrid) -> usize {
    quads(grid).count()
}
