//! Rectangular cell regions: copy, clear, paste and move.

use crate::grid::{Grid, clone_grid, index};
use serde::{Deserialize, Serialize};

/// A rectangle of cells with its origin at the top-left.
///
/// Width and height are never negative; build one from two arbitrary
/// corners with [`normalise_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// A 1×1 rect covering a single cell.
    pub fn cell(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// The same rect shifted by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Smallest rect containing both corner cells, whatever the drag direction.
pub fn normalise_rect(a: (i32, i32), b: (i32, i32)) -> CellRect {
    let min_x = a.0.min(b.0);
    let min_y = a.1.min(b.1);
    let max_x = a.0.max(b.0);
    let max_y = a.1.max(b.1);
    CellRect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Snapshot the cells under `rect`. Parts of the rect outside the grid are
/// dropped, so the result may be smaller than the rect.
pub fn copy_region(grid: &Grid, rect: CellRect) -> Grid {
    let mut region = Grid::new();
    for y in rect.y..rect.y + rect.height {
        let Some(row) = index(y, grid.len()).map(|y| &grid[y]) else {
            continue;
        };
        let cells: Vec<_> = (rect.x..rect.x + rect.width)
            .filter_map(|x| index(x, row.len()).map(|x| row[x].clone()))
            .collect();
        region.push(cells);
    }
    region
}

/// Empty every cell under `rect`.
pub fn clear_region(grid: &Grid, rect: CellRect) -> Grid {
    let mut next = clone_grid(grid);
    for (y, row) in next.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            if rect.contains(x as i32, y as i32) {
                *cell = None;
            }
        }
    }
    next
}

/// Write `region` into the grid with its top-left at `(origin_x, origin_y)`.
/// Cells landing outside the grid are discarded.
pub fn paste_region(grid: &Grid, origin_x: i32, origin_y: i32, region: &Grid) -> Grid {
    let mut next = clone_grid(grid);
    for (ry, source_row) in region.iter().enumerate() {
        let Some(y) = index(origin_y + ry as i32, next.len()) else {
            continue;
        };
        let target_row = &mut next[y];
        for (rx, cell) in source_row.iter().enumerate() {
            if let Some(x) = index(origin_x + rx as i32, target_row.len()) {
                target_row[x] = cell.clone();
            }
        }
    }
    next
}

/// Move the cells under `rect` by `(dx, dy)`: copy, clear the source, paste
/// at the offset. Cells pushed past the edge are lost.
pub fn move_region(grid: &Grid, rect: CellRect, dx: i32, dy: i32) -> Grid {
    let region = copy_region(grid, rect);
    let cleared = clear_region(grid, rect);
    // The copied region starts at the clipped origin, not the raw rect origin.
    let origin_x = rect.x.max(0);
    let origin_y = rect.y.max(0);
    paste_region(&cleared, origin_x + dx, origin_y + dy, &region)
}
