//! Owned raster buffers for the height grid and the optional color grid.
//!
//! Both grids are stored as flat row-major vectors and addressed with
//! `row * width + col`.

use crate::error::{MeshError, Result};

/// Color written for a vertex whose color cannot be looked up.
pub const MISSING_COLOR: [u8; 3] = [255, 0, 255];

/// Single band elevation raster. Non-finite values are holes.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl HeightGrid {
    /// Wraps a row-major buffer of `width * height` heights.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        if values.len() != width * height {
            return Err(MeshError::invalid_raster(format!(
                "expected {} height values for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Builds a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(idx) = rows.iter().position(|r| r.len() != width) {
            return Err(MeshError::invalid_raster(format!(
                "row {} has {} values, expected {}",
                idx,
                rows[idx].len(),
                width
            )));
        }
        Self::new(width, rows.len(), rows.concat())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Height at (`row`, `col`), or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.height && col < self.width {
            Some(self.values[row * self.width + col])
        } else {
            None
        }
    }

    /// A cell yields a vertex iff its height is finite.
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(f32::is_finite)
    }

    pub fn finite_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }
}

/// 8-bit color raster with one (gray) or three (RGB) interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl ColorGrid {
    /// Wraps `width * height * channels` interleaved samples.
    pub fn new(width: usize, height: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        if channels != 1 && channels != 3 {
            return Err(MeshError::UnsupportedChannels { channels });
        }
        if samples.len() != width * height * channels {
            return Err(MeshError::invalid_raster(format!(
                "expected {} color samples for a {}x{}x{} grid, got {}",
                width * height * channels,
                width,
                height,
                channels,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Gray grid of full intensity, used for the `WHITE` override.
    pub fn uniform_white(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            channels: 1,
            samples: vec![255; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// RGB triple at (`row`, `col`). Gray samples are replicated into all
    /// three channels.
    pub fn rgb_at(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let start = (row * self.width + col) * self.channels;
        let px = &self.samples[start..start + self.channels];
        match *px {
            [g] => Some([g, g, g]),
            [r, g, b] => Some([r, g, b]),
            _ => None,
        }
    }

    /// Fails unless this grid has exactly the dimensions of `heights`.
    pub fn ensure_matches(&self, heights: &HeightGrid) -> Result<()> {
        if self.width != heights.width() || self.height != heights.height() {
            return Err(MeshError::SizeMismatch {
                width: heights.width(),
                height: heights.height(),
                color_width: self.width,
                color_height: self.height,
            });
        }
        Ok(())
    }
}
