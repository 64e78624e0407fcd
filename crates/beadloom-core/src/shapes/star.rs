//! Five-pointed star pegboards.

use super::{Mask, mask_from_fn};
use kurbo::{BezPath, Point, Shape as KurboShape};
use std::f64::consts::PI;

const POINTS: usize = 5;
const INNER_RATIO: f64 = 0.5;

/// Star with one point straight up, outer radius touching the box.
pub(super) fn mask(cols: usize, rows: usize) -> Mask {
    let center = Point::new(cols as f64 / 2.0, rows as f64 / 2.0);
    let outer = cols.min(rows) as f64 / 2.0;
    let inner = outer * INNER_RATIO;

    let mut path = BezPath::new();
    for i in 0..POINTS * 2 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = -PI / 2.0 + i as f64 * PI / POINTS as f64;
        let vertex = Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
        if i == 0 {
            path.move_to(vertex);
        } else {
            path.line_to(vertex);
        }
    }
    path.close_path();
    mask_from_fn(cols, rows, |p| path.contains(p))
}

#[cfg(test)]
mod tests {
    use super::super::PegboardShape;

    #[test]
    fn test_star_top_point() {
        let shape = PegboardShape::star(21);
        assert!(shape.contains(10, 10));
        assert!(shape.contains(10, 1));
        assert!(!shape.contains(3, 1));
        assert!(!shape.contains(17, 1));
    }

    #[test]
    fn test_star_has_fewer_cells_than_box() {
        let shape = PegboardShape::star(21);
        assert!(shape.valid_cell_count() < 21 * 21 / 2);
        assert!(shape.valid_cell_count() > 0);
    }
}
