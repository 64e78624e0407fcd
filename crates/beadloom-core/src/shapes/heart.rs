//! Heart-shaped pegboards.

use super::{Mask, mask_from_fn};
use kurbo::{BezPath, Point, Shape as KurboShape};

/// Two cubic lobes meeting at a notch on top and a point at the bottom,
/// laid out in the unit square and scaled to the box.
pub(super) fn mask(cols: usize, rows: usize) -> Mask {
    let (w, h) = (cols as f64, rows as f64);
    let p = |x: f64, y: f64| Point::new(x * w, y * h);

    let mut path = BezPath::new();
    path.move_to(p(0.5, 0.3));
    path.curve_to(p(0.5, 0.05), p(0.0, 0.0), p(0.0, 0.35));
    path.curve_to(p(0.0, 0.6), p(0.35, 0.75), p(0.5, 1.0));
    path.curve_to(p(0.65, 0.75), p(1.0, 0.6), p(1.0, 0.35));
    path.curve_to(p(1.0, 0.0), p(0.5, 0.05), p(0.5, 0.3));
    path.close_path();
    mask_from_fn(cols, rows, |pt| path.contains(pt))
}

#[cfg(test)]
mod tests {
    use super::super::PegboardShape;

    #[test]
    fn test_heart_notch_and_point() {
        let shape = PegboardShape::heart(20);
        // Lobes are filled, the notch between them is not.
        assert!(shape.contains(5, 5));
        assert!(shape.contains(14, 5));
        assert!(!shape.contains(10, 1));
        // Narrow point at the bottom.
        assert!(shape.contains(9, 17));
        assert!(!shape.contains(1, 18));
        assert!(!shape.contains(18, 18));
    }
}
