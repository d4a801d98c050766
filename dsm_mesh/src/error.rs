//! Error types shared by the raster readers, the mesher and the PLY writer.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors produced while turning a DSM into a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF decoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// The raster file was read but its content makes no sense.
    #[error("invalid raster: {message}")]
    InvalidRaster { message: String },

    #[error("unsupported raster format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// Color raster and height raster must have identical dimensions.
    #[error("colors and dsm size mismatch: colors are {color_width}x{color_height}, dsm is {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        color_width: usize,
        color_height: usize,
    },

    #[error("expecting a gray or color image, got {channels} channels")]
    UnsupportedChannels { channels: usize },

    #[error("resolution must be a positive finite number, got {0}")]
    InvalidResolution(f32),

    /// The number of records written disagrees with the header. This is a
    /// bug in the mesher, never a problem with the input.
    #[error("internal error: header declares {declared} {element} records but {written} were written")]
    CountMismatch {
        element: &'static str,
        declared: usize,
        written: usize,
    },
}

impl MeshError {
    pub fn invalid_raster(message: impl Into<String>) -> Self {
        Self::InvalidRaster {
            message: message.into(),
        }
    }
}
