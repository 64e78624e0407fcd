//! Pegboard shapes and cell-validity masks.
//!
//! A pegboard is a bounding box of `cols × rows` cells plus an optional mask
//! saying which of those cells physically hold a peg. Each [`ShapeKind`] has
//! one mask builder; rectangular kinds carry no mask at all.

mod circle;
mod heart;
mod hexagon;
mod rectangle;
mod star;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pegboard shapes.
pub type ShapeId = String;

/// Row-major validity mask, `mask[y][x]`.
pub type Mask = Vec<Vec<bool>>;

/// Geometric family of a pegboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Square,
    Rectangle,
    Circle,
    Hexagon,
    Heart,
    Star,
}

impl ShapeKind {
    /// Whether shapes of this kind carry a mask.
    pub fn is_masked(self) -> bool {
        !matches!(self, ShapeKind::Square | ShapeKind::Rectangle)
    }
}

/// A pegboard template that patterns are drawn onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PegboardShape {
    pub id: ShapeId,
    pub name: String,
    pub kind: ShapeKind,
    pub cols: usize,
    pub rows: usize,
    /// Rectangles only. Recorded but does not restrict coverage.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hollow: bool,
    /// `None` means every in-bounds cell is usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Mask>,
}

impl PegboardShape {
    /// Create a shape of the given kind, building its mask.
    pub fn new(kind: ShapeKind, cols: usize, rows: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: default_name(kind, cols, rows),
            kind,
            cols,
            rows,
            hollow: false,
            mask: build_mask(kind, cols, rows),
        }
    }

    /// Reconstruct a shape with a specific ID and mask (for storage).
    pub fn reconstruct(
        id: impl Into<ShapeId>,
        name: impl Into<String>,
        kind: ShapeKind,
        cols: usize,
        rows: usize,
        mask: Option<Mask>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            cols,
            rows,
            hollow: false,
            mask,
        }
    }

    pub fn square(size: usize) -> Self {
        rectangle::square(size)
    }

    pub fn rectangle(cols: usize, rows: usize, hollow: bool) -> Self {
        rectangle::rectangle(cols, rows, hollow)
    }

    pub fn circle(diameter: usize) -> Self {
        Self::new(ShapeKind::Circle, diameter, diameter)
    }

    pub fn hexagon(diameter: usize) -> Self {
        Self::new(ShapeKind::Hexagon, diameter, diameter)
    }

    pub fn heart(size: usize) -> Self {
        Self::new(ShapeKind::Heart, size, size)
    }

    pub fn star(size: usize) -> Self {
        Self::new(ShapeKind::Star, size, size)
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check whether a cell is usable on this pegboard.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        is_cell_in_shape(self, x, y)
    }

    /// Check the mask dimensions against `cols`/`rows`.
    pub fn is_mask_consistent(&self) -> bool {
        match &self.mask {
            None => true,
            Some(mask) => mask.len() == self.rows && mask.iter().all(|row| row.len() == self.cols),
        }
    }

    /// Number of usable cells.
    pub fn valid_cell_count(&self) -> usize {
        match &self.mask {
            None => self.cols * self.rows,
            Some(mask) => mask.iter().flatten().filter(|&&valid| valid).count(),
        }
    }
}

fn default_name(kind: ShapeKind, cols: usize, rows: usize) -> String {
    let label = match kind {
        ShapeKind::Square => "Square",
        ShapeKind::Rectangle => "Rectangle",
        ShapeKind::Circle => "Circle",
        ShapeKind::Hexagon => "Hexagon",
        ShapeKind::Heart => "Heart",
        ShapeKind::Star => "Star",
    };
    format!("{} {}×{}", label, cols, rows)
}

/// Build the mask for a shape kind. Rectangular kinds have none.
pub fn build_mask(kind: ShapeKind, cols: usize, rows: usize) -> Option<Mask> {
    match kind {
        ShapeKind::Square | ShapeKind::Rectangle => None,
        ShapeKind::Circle => Some(circle::mask(cols, rows)),
        ShapeKind::Hexagon => Some(hexagon::mask(cols, rows)),
        ShapeKind::Heart => Some(heart::mask(cols, rows)),
        ShapeKind::Star => Some(star::mask(cols, rows)),
    }
}

/// Check whether `(x, y)` is a usable cell of `shape`.
///
/// Anything outside `[0, cols) × [0, rows)` is invalid regardless of the
/// mask. A mask row or column that is missing counts as invalid.
pub fn is_cell_in_shape(shape: &PegboardShape, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= shape.cols || y >= shape.rows {
        return false;
    }
    match &shape.mask {
        None => true,
        Some(mask) => mask
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false),
    }
}

/// Evaluate `inside` at every cell center of a `cols × rows` box.
pub(crate) fn mask_from_fn(cols: usize, rows: usize, inside: impl Fn(Point) -> bool) -> Mask {
    (0..rows)
        .map(|y| {
            (0..cols)
                .map(|x| inside(Point::new(x as f64 + 0.5, y as f64 + 0.5)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmasked_shape_bounds() {
        let shape = PegboardShape::rectangle(4, 3, false);
        for y in -1..5 {
            for x in -1..6 {
                let expected = (0..4).contains(&x) && (0..3).contains(&y);
                assert_eq!(is_cell_in_shape(&shape, x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_missing_mask_row_is_invalid() {
        let shape = PegboardShape::reconstruct(
            "s",
            "Broken",
            ShapeKind::Circle,
            2,
            2,
            Some(vec![vec![true, true]]),
        );
        assert!(shape.contains(1, 0));
        assert!(!shape.contains(1, 1));
        assert!(!shape.is_mask_consistent());
    }

    #[test]
    fn test_masked_kinds_are_consistent() {
        for kind in [
            ShapeKind::Circle,
            ShapeKind::Hexagon,
            ShapeKind::Heart,
            ShapeKind::Star,
        ] {
            let shape = PegboardShape::new(kind, 15, 15);
            assert!(shape.mask.is_some());
            assert!(shape.is_mask_consistent());
            assert!(shape.contains(7, 7), "{kind:?} center");
            assert!(!shape.contains(0, 0), "{kind:?} corner");
        }
    }

    #[test]
    fn test_serde_kind_names() {
        let json = serde_json::to_string(&ShapeKind::Hexagon).unwrap();
        assert_eq!(json, "\"hexagon\"");
    }
}
