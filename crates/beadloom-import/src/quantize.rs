//! Pixel to bead-color quantization.

use crate::ConvertError;
use crate::raster::Raster;
use beadloom_core::grid::count_colors;
use beadloom_core::{BeadColor, BeadPalette, ColorId, Grid, MAX_GRID_DIMENSION, Rgb, nearest_palette_color};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::thread::{self, JoinHandle};

/// How pixels are mapped onto palette colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dithering {
    /// Each pixel independently.
    #[default]
    None,
    /// Error diffusion to the right and lower neighbours.
    FloydSteinberg,
}

/// Parameters for [`image_data_to_bead_grid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    pub cols: usize,
    pub rows: usize,
    /// Upper bound on distinct colors. `None` or `Some(0)` means unlimited.
    #[serde(default)]
    pub max_colors: Option<usize>,
    #[serde(default)]
    pub dithering: Dithering,
    /// Largest accepted value for `cols` and `rows`.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: usize,
}

fn default_max_dimension() -> usize {
    MAX_GRID_DIMENSION
}

impl ConversionOptions {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            max_colors: None,
            dithering: Dithering::None,
            max_dimension: MAX_GRID_DIMENSION,
        }
    }

    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = Some(max_colors);
        self
    }

    pub fn with_dithering(mut self, dithering: Dithering) -> Self {
        self.dithering = dithering;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Reject empty grids and grids past `max_dimension`.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let in_range = |n: usize| (1..=self.max_dimension).contains(&n);
        if in_range(self.cols) && in_range(self.rows) {
            Ok(())
        } else {
            Err(ConvertError::TooLarge {
                cols: self.cols,
                rows: self.rows,
                max: self.max_dimension,
            })
        }
    }

    fn color_cap(&self) -> Option<usize> {
        self.max_colors.filter(|&n| n > 0)
    }
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub grid: Grid,
    /// Distinct ids in the grid, in first-appearance order.
    pub used_color_ids: Vec<ColorId>,
}

/// Convert a raster sized exactly `cols` by `rows` into a bead grid.
pub fn image_data_to_bead_grid(
    raster: &Raster,
    palette: &BeadPalette,
    options: &ConversionOptions,
) -> Result<Conversion, ConvertError> {
    if palette.is_empty() {
        return Err(ConvertError::EmptyPalette);
    }
    raster.check_buffer()?;
    if raster.width != options.cols || raster.height != options.rows {
        return Err(ConvertError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
            cols: options.cols,
            rows: options.rows,
        });
    }
    options.validate()?;

    let mapped = match options.dithering {
        Dithering::None => map_nearest(raster, &palette.colors)?,
        Dithering::FloydSteinberg => map_floyd_steinberg(raster, &palette.colors)?,
    };
    let grid = match options.color_cap() {
        Some(cap) => cap_colors(mapped, palette, cap),
        None => mapped,
    };
    let used_color_ids: Vec<ColorId> = count_colors(&grid).into_iter().map(|(id, _)| id).collect();

    log::info!(
        "Converted {}x{} raster to {} colors from palette {} ({:?})",
        raster.width,
        raster.height,
        used_color_ids.len(),
        palette.id,
        options.dithering
    );
    Ok(Conversion {
        grid,
        used_color_ids,
    })
}

/// Run [`image_data_to_bead_grid`] on a worker thread.
pub fn convert_in_background(
    raster: Raster,
    palette: BeadPalette,
    options: ConversionOptions,
) -> JoinHandle<Result<Conversion, ConvertError>> {
    thread::spawn(move || image_data_to_bead_grid(&raster, &palette, &options))
}

fn map_nearest(raster: &Raster, colors: &[BeadColor]) -> Result<Grid, ConvertError> {
    let mut grid = Vec::with_capacity(raster.height);
    for row in raster.data.chunks_exact(raster.width * 4) {
        let cells = row
            .chunks_exact(4)
            .map(|px| {
                let color = nearest_palette_color(Rgb::new(px[0], px[1], px[2]), colors)?;
                Ok(Some(color.id.clone()))
            })
            .collect::<Result<Vec<_>, ConvertError>>()?;
        grid.push(cells);
    }
    Ok(grid)
}

/// Nearest color to an accumulated value. The value may lie outside byte
/// range after diffusion and is searched as is.
fn nearest_f32<'a>(value: [f32; 3], colors: &'a [BeadColor]) -> Result<&'a BeadColor, ConvertError> {
    let mut best: Option<(&BeadColor, f32)> = None;
    for color in colors {
        let dr = value[0] - color.rgb.r as f32;
        let dg = value[1] - color.rgb.g as f32;
        let db = value[2] - color.rgb.b as f32;
        let dist = dr * dr + dg * dg + db * db;
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((color, dist)),
        }
    }
    best.map(|(c, _)| c).ok_or(ConvertError::EmptyPalette)
}

fn map_floyd_steinberg(raster: &Raster, colors: &[BeadColor]) -> Result<Grid, ConvertError> {
    let (width, height) = (raster.width, raster.height);
    let mut buffer: Vec<[f32; 3]> = raster
        .data
        .chunks_exact(4)
        .map(|px| [px[0] as f32, px[1] as f32, px[2] as f32])
        .collect();

    let spread = |buffer: &mut Vec<[f32; 3]>, x: usize, dx: isize, y: usize, error: [f32; 3], weight: f32| {
        let Some(nx) = x.checked_add_signed(dx).filter(|&nx| nx < width) else {
            return;
        };
        if y >= height {
            return;
        }
        let target = &mut buffer[y * width + nx];
        for c in 0..3 {
            target[c] += error[c] * weight;
        }
    };

    let mut grid = Vec::with_capacity(height);
    for y in 0..height {
        let mut row = Vec::with_capacity(width);
        for x in 0..width {
            let value = buffer[y * width + x];
            let chosen = nearest_f32(value, colors)?;
            row.push(Some(chosen.id.clone()));

            let rgb = chosen.rgb;
            let error = [
                value[0] - rgb.r as f32,
                value[1] - rgb.g as f32,
                value[2] - rgb.b as f32,
            ];
            spread(&mut buffer, x, 1, y, error, 7.0 / 16.0);
            spread(&mut buffer, x, -1, y + 1, error, 3.0 / 16.0);
            spread(&mut buffer, x, 0, y + 1, error, 5.0 / 16.0);
            spread(&mut buffer, x, 1, y + 1, error, 1.0 / 16.0);
        }
        grid.push(row);
    }
    Ok(grid)
}

/// Keep the `cap` most used colors and remap the rest onto their nearest
/// kept color. Ties in usage keep first-appearance order.
fn cap_colors(grid: Grid, palette: &BeadPalette, cap: usize) -> Grid {
    let mut counts = count_colors(&grid);
    if counts.len() <= cap {
        return grid;
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let (kept, dropped) = counts.split_at(cap);

    let kept_colors: Vec<BeadColor> = kept
        .iter()
        .filter_map(|(id, _)| palette.color(id).cloned())
        .collect();

    let mut replacements: HashMap<&str, ColorId> = HashMap::new();
    for (id, _) in dropped {
        let replacement = palette
            .color(id)
            .and_then(|color| nearest_palette_color(color.rgb, &kept_colors).ok());
        match replacement {
            Some(color) => {
                replacements.insert(id.as_str(), color.id.clone());
            }
            None => log::warn!("No replacement for color {}, keeping it", id),
        }
    }

    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(id) => Some(replacements.get(id.as_str()).unwrap_or(id).clone()),
                    None => None,
                })
                .collect()
        })
        .collect()
}
