//! Circular pegboards.

use super::{Mask, mask_from_fn};
use kurbo::{Circle, Point};

/// Cells whose center lies within `min(cols, rows) / 2` of the box center.
pub(super) fn mask(cols: usize, rows: usize) -> Mask {
    let circle = Circle::new(
        Point::new(cols as f64 / 2.0, rows as f64 / 2.0),
        cols.min(rows) as f64 / 2.0,
    );
    let radius_sq = circle.radius * circle.radius;
    mask_from_fn(cols, rows, |p| (p - circle.center).hypot2() <= radius_sq)
}
