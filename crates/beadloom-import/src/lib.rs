//! Beadloom image import
//!
//! Turns RGBA rasters into bead grids: nearest palette color per pixel,
//! optional Floyd–Steinberg dithering, and an optional cap on the number of
//! distinct colors.

mod quantize;
mod raster;

pub use image::imageops::FilterType;
pub use quantize::{
    Conversion, ConversionOptions, Dithering, convert_in_background, image_data_to_bead_grid,
};
pub use raster::{Raster, load_raster, load_raster_with_limit};

use beadloom_core::ColorError;
use thiserror::Error;

/// Errors raised while converting an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Palette has no colors")]
    EmptyPalette,
    #[error("Raster is {width}x{height} but the grid is {cols}x{rows}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        cols: usize,
        rows: usize,
    },
    #[error("Raster buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },
    #[error("Grid {cols}x{rows} is empty or larger than {max} cells per side")]
    TooLarge { cols: usize, rows: usize, max: usize },
    #[error("Image decode failed: {0}")]
    Decode(String),
}

impl From<ColorError> for ConvertError {
    fn from(err: ColorError) -> Self {
        match err {
            ColorError::EmptyPalette => ConvertError::EmptyPalette,
        }
    }
}
