//! ESRI ASCII grid reader.
//!
//! ```text
//! ncols 3
//! nrows 2
//! xllcorner 0.0
//! yllcorner 0.0
//! cellsize 0.5
//! NODATA_value -9999
//! 1 2 3
//! 4 -9999 6
//! ```
//!
//! Rows are stored top to bottom. Cells equal to `NODATA_value` become NaN.

use crate::error::{MeshError, Result};
use crate::raster::HeightGrid;

const HEADER_KEYS: [&str; 9] = [
    "ncols",
    "nrows",
    "xllcorner",
    "xllcenter",
    "yllcorner",
    "yllcenter",
    "cellsize",
    "dx",
    "dy",
];
const NODATA_KEY: &str = "nodata_value";

fn line_error(idx: usize, message: impl std::fmt::Display) -> MeshError {
    MeshError::invalid_raster(format!("line {}: {}", idx + 1, message))
}

/// Parses the text of an ASCII grid.
pub fn parse_asc(contents: &str) -> Result<HeightGrid> {
    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut nodata: Option<f32> = None;

    let mut lines = contents.lines().enumerate().peekable();
    while let Some(&(idx, line)) = lines.peek() {
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else {
            lines.next();
            continue;
        };
        let key = key.to_ascii_lowercase();
        if key != NODATA_KEY && !HEADER_KEYS.contains(&key.as_str()) {
            break;
        }
        let value = parts
            .next()
            .ok_or_else(|| line_error(idx, format!("missing value for {key}")))?;
        match key.as_str() {
            "ncols" => ncols = Some(value.parse().map_err(|e| line_error(idx, e))?),
            "nrows" => nrows = Some(value.parse().map_err(|e| line_error(idx, e))?),
            NODATA_KEY => nodata = Some(value.parse().map_err(|e| line_error(idx, e))?),
            _ => {
                value.parse::<f64>().map_err(|e| line_error(idx, e))?;
            }
        }
        lines.next();
    }

    let ncols = ncols.ok_or_else(|| MeshError::invalid_raster("missing ncols"))?;
    let nrows = nrows.ok_or_else(|| MeshError::invalid_raster("missing nrows"))?;

    let cells = ncols
        .checked_mul(nrows)
        .ok_or_else(|| MeshError::invalid_raster("grid too large"))?;

    let mut values = Vec::new();
    for (idx, line) in lines {
        for token in line.split_whitespace() {
            let v: f32 = token.parse().map_err(|e| line_error(idx, e))?;
            values.push(if nodata == Some(v) { f32::NAN } else { v });
        }
    }
    if values.len() != cells {
        return Err(MeshError::invalid_raster(format!(
            "expected {} cells ({}x{}), found {}",
            cells,
            ncols,
            nrows,
            values.len()
        )));
    }
    HeightGrid::new(ncols, nrows, values)
}

/// Reads an ASCII grid file.
pub fn read_asc(path: &str) -> Result<HeightGrid> {
    let contents = crate::io::read_to_string(path)?;
    parse_asc(&contents)
}
