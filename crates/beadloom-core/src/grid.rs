//! Bead grids and the pure edit operations on them.
//!
//! Every operation takes a grid by reference and returns a new one. Index
//! math clips silently: painting outside the grid is a no-op, never an error.

use crate::color::ColorId;
use crate::shapes::{PegboardShape, is_cell_in_shape};
use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};

/// A single bead position.
pub type Cell = Option<ColorId>;

/// Row-major bead grid, `grid[y][x]`.
pub type Grid = Vec<Vec<Cell>>;

/// Create a `cols × rows` grid with every cell empty.
pub fn create_empty_grid(cols: usize, rows: usize) -> Grid {
    vec![vec![None; cols]; rows]
}

/// Deep copy of a grid.
pub fn clone_grid(grid: &Grid) -> Grid {
    grid.iter().map(|row| row.to_vec()).collect()
}

/// Check that a grid has exactly `rows` rows of `cols` cells.
pub fn is_grid_rectangular(grid: &Grid, cols: usize, rows: usize) -> bool {
    grid.len() == rows && grid.iter().all(|row| row.len() == cols)
}

/// Convert a signed coordinate into an index below `len`.
pub(crate) fn index(coord: i32, len: usize) -> Option<usize> {
    usize::try_from(coord).ok().filter(|&i| i < len)
}

/// Read a cell, `None` when out of range or empty.
pub fn cell_at(grid: &Grid, x: i32, y: i32) -> Option<&str> {
    let row = grid.get(index(y, grid.len())?)?;
    row.get(index(x, row.len())?)?.as_deref()
}

fn set_cell(grid: &Grid, x: i32, y: i32, value: Cell) -> Grid {
    let mut next = clone_grid(grid);
    if let Some(row) = index(y, next.len()).map(|y| &mut next[y]) {
        if let Some(x) = index(x, row.len()) {
            row[x] = value;
        }
    }
    next
}

/// Paint one cell. Out-of-range coordinates yield an unmodified copy.
pub fn apply_pencil(grid: &Grid, x: i32, y: i32, color: &str) -> Grid {
    set_cell(grid, x, y, Some(color.to_string()))
}

/// Empty one cell. Out-of-range coordinates yield an unmodified copy.
pub fn apply_eraser(grid: &Grid, x: i32, y: i32) -> Grid {
    set_cell(grid, x, y, None)
}

/// 4-connected flood fill from `(x, y)`.
///
/// Returns `Cow::Borrowed(grid)` when nothing would change (the seed already
/// holds `new_color`, or the seed is outside the grid) so callers can skip
/// recording a history step.
pub fn apply_fill<'a>(grid: &'a Grid, x: i32, y: i32, new_color: Option<&str>) -> Cow<'a, Grid> {
    let Some(sy) = index(y, grid.len()) else {
        return Cow::Borrowed(grid);
    };
    let Some(sx) = index(x, grid[sy].len()) else {
        return Cow::Borrowed(grid);
    };
    let target = grid[sy][sx].clone();
    if target.as_deref() == new_color {
        return Cow::Borrowed(grid);
    }

    let replacement: Cell = new_color.map(str::to_string);
    let mut next = clone_grid(grid);
    let mut queue = VecDeque::from([(sx, sy)]);
    next[sy][sx] = replacement.clone();

    while let Some((cx, cy)) = queue.pop_front() {
        let mut neighbors = Vec::with_capacity(4);
        if cx > 0 {
            neighbors.push((cx - 1, cy));
        }
        if cy > 0 {
            neighbors.push((cx, cy - 1));
        }
        neighbors.push((cx + 1, cy));
        neighbors.push((cx, cy + 1));

        for (nx, ny) in neighbors {
            let Some(cell) = next.get_mut(ny).and_then(|row| row.get_mut(nx)) else {
                continue;
            };
            if *cell == target {
                *cell = replacement.clone();
                queue.push_back((nx, ny));
            }
        }
    }

    Cow::Owned(next)
}

/// Replace every occurrence of `from` with `to`.
pub fn replace_color(grid: &Grid, from: &str, to: &str) -> Grid {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell.as_deref() {
                    Some(id) if id == from => Some(to.to_string()),
                    _ => cell.clone(),
                })
                .collect()
        })
        .collect()
}

/// Mirror left-to-right.
pub fn mirror_grid_horizontally(grid: &Grid) -> Grid {
    grid.iter()
        .map(|row| row.iter().rev().cloned().collect())
        .collect()
}

/// Mirror top-to-bottom.
pub fn mirror_grid_vertically(grid: &Grid) -> Grid {
    grid.iter().rev().map(|row| row.to_vec()).collect()
}

/// Empty every cell that is not usable on `shape`.
pub fn apply_shape_mask(grid: &Grid, shape: &PegboardShape) -> Grid {
    grid.iter()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, cell)| {
                    if is_cell_in_shape(shape, x as i32, y as i32) {
                        cell.clone()
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

/// Bead counts per color, in order of first appearance (row-major).
pub fn count_colors(grid: &Grid) -> Vec<(ColorId, usize)> {
    let mut order: Vec<ColorId> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in grid.iter().flatten().flatten() {
        let count = counts.entry(id.as_str()).or_insert(0);
        if *count == 0 {
            order.push(id.clone());
        }
        *count += 1;
    }
    order
        .into_iter()
        .map(|id| {
            let n = counts[id.as_str()];
            (id, n)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|&c| if c == "." { None } else { Some(c.to_string()) })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_empty_grid_shape() {
        let grid = create_empty_grid(3, 2);
        assert!(is_grid_rectangular(&grid, 3, 2));
        assert!(!is_grid_rectangular(&grid, 2, 3));
        assert!(grid.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_clone_grid_is_independent() {
        let grid = grid_of(&[&["a", "b"]]);
        let mut copy = clone_grid(&grid);
        assert_eq!(copy, grid);
        copy[0][0] = None;
        assert_eq!(grid[0][0].as_deref(), Some("a"));
    }

    #[test]
    fn test_pencil_and_eraser_leave_source_untouched() {
        let grid = grid_of(&[&["a", "."], &[".", "b"]]);

        let painted = apply_pencil(&grid, 1, 0, "c");
        assert_eq!(painted[0][1].as_deref(), Some("c"));
        assert_eq!(grid[0][1], None);

        let erased = apply_eraser(&grid, 1, 1);
        assert_eq!(erased[1][1], None);
        assert_eq!(grid[1][1].as_deref(), Some("b"));
    }

    #[test]
    fn test_pencil_out_of_range_is_noop_copy() {
        let grid = grid_of(&[&["a"]]);
        assert_eq!(apply_pencil(&grid, 0, 5, "x"), grid);
        assert_eq!(apply_pencil(&grid, -1, 0, "x"), grid);
        assert_eq!(apply_eraser(&grid, 3, 0), grid);
    }

    #[test]
    fn test_fill_region() {
        let grid = grid_of(&[&["a", "a", "b"], &["a", "b", "b"], &["c", "c", "b"]]);
        let filled = apply_fill(&grid, 0, 0, Some("x"));
        assert_eq!(
            filled.into_owned(),
            grid_of(&[&["x", "x", "b"], &["x", "b", "b"], &["c", "c", "b"]])
        );
    }

    #[test]
    fn test_fill_same_color_returns_original() {
        let grid = grid_of(&[&["a", "b"]]);
        let result = apply_fill(&grid, 0, 0, Some("a"));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ref(), &grid));
    }

    #[test]
    fn test_fill_empty_cells() {
        let grid = grid_of(&[&[".", "a", "."], &[".", "a", "."]]);
        let filled = apply_fill(&grid, 2, 1, Some("z")).into_owned();
        assert_eq!(filled, grid_of(&[&[".", "a", "z"], &[".", "a", "z"]]));
    }

    #[test]
    fn test_fill_is_not_diagonal() {
        let grid = grid_of(&[&["a", "b"], &["b", "a"]]);
        let filled = apply_fill(&grid, 0, 0, Some("x")).into_owned();
        assert_eq!(filled, grid_of(&[&["x", "b"], &["b", "a"]]));
    }

    #[test]
    fn test_fill_out_of_range_seed() {
        let grid = grid_of(&[&["a"]]);
        assert!(matches!(apply_fill(&grid, 4, 4, Some("x")), Cow::Borrowed(_)));
    }

    #[test]
    fn test_replace_color() {
        let grid = grid_of(&[&["a", "b"], &["a", "."]]);
        assert_eq!(
            replace_color(&grid, "a", "c"),
            grid_of(&[&["c", "b"], &["c", "."]])
        );
    }

    #[test]
    fn test_mirrors() {
        let grid = grid_of(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(mirror_grid_horizontally(&grid), grid_of(&[&["b", "a"], &["d", "c"]]));
        assert_eq!(mirror_grid_vertically(&grid), grid_of(&[&["c", "d"], &["a", "b"]]));
    }

    #[test]
    fn test_apply_shape_mask_clears_corners() {
        let shape = PegboardShape::circle(9);
        let grid: Grid = vec![vec![Some("a".to_string()); 9]; 9];
        let masked = apply_shape_mask(&grid, &shape);
        assert_eq!(masked[0][0], None);
        assert_eq!(masked[4][4].as_deref(), Some("a"));
    }

    #[test]
    fn test_count_colors_first_seen_order() {
        let grid = grid_of(&[&["b", "a", "b"], &[".", "a", "b"]]);
        assert_eq!(
            count_colors(&grid),
            vec![("b".to_string(), 3), ("a".to_string(), 2)]
        );
    }

    #[test]
    fn test_cell_at() {
        let grid = grid_of(&[&["a", "."]]);
        assert_eq!(cell_at(&grid, 0, 0), Some("a"));
        assert_eq!(cell_at(&grid, 1, 0), None);
        assert_eq!(cell_at(&grid, -1, 0), None);
    }
}
