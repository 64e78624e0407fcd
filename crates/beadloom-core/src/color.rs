//! Bead colors and palettes.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a bead color. Unique across every palette in a project.
pub type ColorId = String;

/// Identifier of a palette.
pub type PaletteId = String;

/// Errors raised by palette lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Palette has no colors")]
    EmptyPalette,
}

/// An sRGB triplet (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

/// A single bead color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeadColor {
    pub id: ColorId,
    pub name: String,
    pub palette_id: PaletteId,
    pub rgb: Rgb,
}

impl BeadColor {
    pub fn new(id: impl Into<ColorId>, name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            palette_id: PaletteId::new(),
            rgb,
        }
    }
}

/// A named set of selectable bead colors, usually one product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeadPalette {
    pub id: PaletteId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub colors: Vec<BeadColor>,
}

impl BeadPalette {
    /// Create a palette. Every color is re-pointed at this palette.
    pub fn new(id: impl Into<PaletteId>, name: impl Into<String>, colors: Vec<BeadColor>) -> Self {
        let id = id.into();
        let colors = colors
            .into_iter()
            .map(|mut c| {
                c.palette_id = id.clone();
                c
            })
            .collect();
        Self {
            id,
            name: name.into(),
            brand: None,
            colors,
        }
    }

    /// Builder-style brand setter.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Look up a color by ID.
    pub fn color(&self, id: &str) -> Option<&BeadColor> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.color(id).is_some()
    }

    /// Check that every color points back at this palette.
    pub fn is_consistent(&self) -> bool {
        self.colors.iter().all(|c| c.palette_id == self.id)
    }

    /// All color IDs in palette order.
    pub fn color_ids(&self) -> Vec<ColorId> {
        self.colors.iter().map(|c| c.id.clone()).collect()
    }
}

/// Find the palette color closest to `rgb`.
///
/// Distance is squared Euclidean RGB. On ties the first candidate in slice
/// order wins, so results are stable for a given palette.
pub fn nearest_palette_color(rgb: Rgb, colors: &[BeadColor]) -> Result<&BeadColor, ColorError> {
    let mut best: Option<(&BeadColor, u32)> = None;
    for color in colors {
        let dist = rgb.distance_sq(color.rgb);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((color, dist)),
        }
    }
    best.map(|(c, _)| c).ok_or(ColorError::EmptyPalette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_palette() -> BeadPalette {
        BeadPalette::new(
            "basic",
            "Basic",
            vec![
                BeadColor::new("red", "Red", Rgb::new(255, 0, 0)),
                BeadColor::new("green", "Green", Rgb::new(0, 255, 0)),
                BeadColor::new("blue", "Blue", Rgb::new(0, 0, 255)),
            ],
        )
    }

    #[test]
    fn test_palette_backreferences() {
        let palette = rgb_palette();
        assert!(palette.is_consistent());
        assert_eq!(palette.colors[1].palette_id, "basic");
    }

    #[test]
    fn test_nearest_color() {
        let palette = rgb_palette();
        let nearest = nearest_palette_color(Rgb::new(250, 10, 20), &palette.colors).unwrap();
        assert_eq!(nearest.id, "red");
    }

    #[test]
    fn test_nearest_color_empty_palette() {
        let result = nearest_palette_color(Rgb::new(1, 2, 3), &[]);
        assert_eq!(result.unwrap_err(), ColorError::EmptyPalette);
    }

    #[test]
    fn test_nearest_color_tie_prefers_first() {
        let colors = vec![
            BeadColor::new("a", "A", Rgb::new(0, 0, 0)),
            BeadColor::new("b", "B", Rgb::new(20, 0, 0)),
        ];
        let nearest = nearest_palette_color(Rgb::new(10, 0, 0), &colors).unwrap();
        assert_eq!(nearest.id, "a");
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("#12"), None);
        assert_eq!(Rgb::new(1, 2, 255).to_hex(), "#0102ff");
    }
}
