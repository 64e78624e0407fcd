//! Hexagonal pegboards.

use super::{Mask, mask_from_fn};
use kurbo::{BezPath, Point, Shape as KurboShape};

/// Flat-topped hexagon touching all four sides of the box.
pub(super) fn mask(cols: usize, rows: usize) -> Mask {
    let (w, h) = (cols as f64, rows as f64);
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, h / 2.0));
    path.line_to(Point::new(w / 4.0, 0.0));
    path.line_to(Point::new(w * 3.0 / 4.0, 0.0));
    path.line_to(Point::new(w, h / 2.0));
    path.line_to(Point::new(w * 3.0 / 4.0, h));
    path.line_to(Point::new(w / 4.0, h));
    path.close_path();
    mask_from_fn(cols, rows, |p| path.contains(p))
}
