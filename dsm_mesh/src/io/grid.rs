//! Loading height and color rasters from disk.
//!
//! Height rasters are read from TIFF (any sample type, converted to `f32`),
//! ESRI ASCII grids, or any single band image format the `image` crate can
//! decode. Color rasters go through `image` and must be gray or RGB.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::error::{MeshError, Result};
use crate::io::asc::read_asc;
use crate::raster::{ColorGrid, HeightGrid};

/// GDAL stores the nodata value of a band as an ASCII tag.
const GDAL_NODATA_TAG: u16 = 42113;

fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Reads a single band height raster, choosing the decoder from the extension.
pub fn read_height_grid(path: &str) -> Result<HeightGrid> {
    let grid = match extension(path).as_str() {
        "asc" => read_asc(path)?,
        "tif" | "tiff" => read_height_tiff(path)?,
        ext if ImageFormat::from_extension(ext).is_some() => read_height_image(path)?,
        other => {
            return Err(MeshError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };
    log::info!(
        "read {}x{} height grid from {} ({} finite cells)",
        grid.width(),
        grid.height(),
        path,
        grid.finite_count()
    );
    Ok(grid)
}

/// Reads a single band TIFF. A GDAL nodata tag, if present, marks holes.
pub fn read_height_tiff(path: &str) -> Result<HeightGrid> {
    let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;
    let (width, height) = decoder.dimensions()?;
    match decoder.colortype()? {
        tiff::ColorType::Gray(_) => {}
        other => {
            return Err(MeshError::invalid_raster(format!(
                "expected a single band height raster, got {other:?}"
            )))
        }
    }
    let nodata = decoder
        .find_tag(Tag::Unknown(GDAL_NODATA_TAG))?
        .and_then(|v| v.into_string().ok())
        .and_then(|s| s.trim_matches(char::from(0)).trim().parse::<f32>().ok());

    #[allow(unreachable_patterns)]
    let mut values: Vec<f32> = match decoder.read_image()? {
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
        _ => return Err(MeshError::invalid_raster("unsupported TIFF sample format")),
    };
    if let Some(nodata) = nodata {
        log::debug!("mapping nodata value {} to holes", nodata);
        for v in values.iter_mut().filter(|v| **v == nodata) {
            *v = f32::NAN;
        }
    }
    HeightGrid::new(width as usize, height as usize, values)
}

/// Reads a gray image through `image`, keeping raw sample values as heights.
pub fn read_height_image(path: &str) -> Result<HeightGrid> {
    let img = image::open(path)?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let values: Vec<f32> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        other => {
            return Err(MeshError::invalid_raster(format!(
                "expected a single band height raster, got {:?}",
                other.color()
            )))
        }
    };
    HeightGrid::new(width, height, values)
}

/// Reads a gray or RGB color raster.
pub fn read_color_grid(path: &str) -> Result<ColorGrid> {
    let img = image::open(path)?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let grid = match img.color().channel_count() {
        1 => ColorGrid::new(width, height, 1, img.into_luma8().into_raw())?,
        3 => ColorGrid::new(width, height, 3, img.into_rgb8().into_raw())?,
        n => {
            return Err(MeshError::UnsupportedChannels {
                channels: usize::from(n),
            })
        }
    };
    log::info!(
        "read {}x{} color grid with {} channel(s) from {}",
        width,
        height,
        grid.channels(),
        path
    );
    Ok(grid)
}
