//! Rectangular pegboards.

use super::{PegboardShape, ShapeKind};

pub(super) fn square(size: usize) -> PegboardShape {
    PegboardShape::new(ShapeKind::Square, size, size)
}

/// Rectangles carry no mask. `hollow` is kept on the shape so the editor can
/// display it, but every in-bounds cell stays valid.
pub(super) fn rectangle(cols: usize, rows: usize, hollow: bool) -> PegboardShape {
    let mut shape = PegboardShape::new(ShapeKind::Rectangle, cols, rows);
    shape.hollow = hollow;
    shape
}

#[cfg(test)]
mod tests {
    use super::super::PegboardShape;

    #[test]
    fn test_rectangle_creation() {
        let rect = PegboardShape::rectangle(29, 14, false);
        assert_eq!(rect.cols, 29);
        assert_eq!(rect.rows, 14);
        assert!(rect.mask.is_none());
        assert_eq!(rect.valid_cell_count(), 29 * 14);
    }

    #[test]
    fn test_hollow_rectangle_keeps_full_coverage() {
        let rect = PegboardShape::rectangle(5, 5, true);
        assert!(rect.hollow);
        assert!(rect.contains(2, 2));
    }

    #[test]
    fn test_square() {
        let square = PegboardShape::square(29);
        assert_eq!((square.cols, square.rows), (29, 29));
        assert!(square.contains(28, 28));
        assert!(!square.contains(29, 0));
    }
}
