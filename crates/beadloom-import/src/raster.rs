//! RGBA rasters and decoding them from image files.

use crate::ConvertError;
use beadloom_core::MAX_GRID_DIMENSION;
use image::RgbaImage;
use image::imageops::FilterType;

/// Row-major RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Raster {
    /// Build a raster, checking the buffer holds exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ConvertError> {
        let raster = Self {
            width,
            height,
            data,
        };
        raster.check_buffer()?;
        Ok(raster)
    }

    /// A raster filled with one color.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            data: rgba.repeat(width * height),
        }
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            data: image.as_raw().clone(),
        }
    }

    pub(crate) fn check_buffer(&self) -> Result<(), ConvertError> {
        let expected = self.width * self.height * 4;
        if self.data.len() != expected {
            return Err(ConvertError::InvalidBuffer {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode an encoded image (PNG, JPEG or WebP) and resample it to exactly
/// `cols` by `rows` pixels, one per bead.
pub fn load_raster(
    bytes: &[u8],
    cols: usize,
    rows: usize,
    filter: FilterType,
) -> Result<Raster, ConvertError> {
    load_raster_with_limit(bytes, cols, rows, MAX_GRID_DIMENSION, filter)
}

/// [`load_raster`] with a caller-supplied bound on `cols` and `rows`.
pub fn load_raster_with_limit(
    bytes: &[u8],
    cols: usize,
    rows: usize,
    max_dimension: usize,
    filter: FilterType,
) -> Result<Raster, ConvertError> {
    if cols == 0 || rows == 0 || cols > max_dimension || rows > max_dimension {
        return Err(ConvertError::TooLarge {
            cols,
            rows,
            max: max_dimension,
        });
    }
    let image = image::load_from_memory(bytes).map_err(|e| ConvertError::Decode(e.to_string()))?;
    log::debug!(
        "Decoded {}x{} image, resampling to {}x{}",
        image.width(),
        image.height(),
        cols,
        rows
    );
    let resized = image.resize_exact(cols as u32, rows as u32, filter).to_rgba8();
    Ok(Raster::from_rgba_image(&resized))
}
