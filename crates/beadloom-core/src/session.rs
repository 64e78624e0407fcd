//! Editing session: one open pattern, its history, selection and tools.
//!
//! A session never owns pattern data. Every committed edit goes through the
//! history first and is then written back with [`Store::update_pattern`].

use crate::config::EditorConfig;
use crate::grid::{
    Grid, apply_eraser, apply_fill, apply_pencil, cell_at, index,
    mirror_grid_horizontally, mirror_grid_vertically, replace_color,
};
use crate::history::HistoryTracker;
use crate::pattern::{PatternId, PatternUpdate};
use crate::region::{CellRect, clear_region, copy_region, move_region, paste_region};
use crate::selection::{Clipboard, SelectionState};
use crate::shapes::{PegboardShape, is_cell_in_shape};
use crate::store::Store;
use crate::tools::{ToolKind, ToolOutcome};
use std::borrow::Cow;

/// Editor state for whichever pattern is currently open.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pattern_id: Option<PatternId>,
    history: HistoryTracker,
    selection: SelectionState,
    clipboard: Clipboard,
    tool: ToolKind,
}

impl EditorSession {
    /// Create a session sharing `clipboard` with other sessions.
    pub fn new(clipboard: Clipboard) -> Self {
        Self::with_config(clipboard, &EditorConfig::default())
    }

    pub fn with_config(clipboard: Clipboard, config: &EditorConfig) -> Self {
        Self {
            pattern_id: None,
            history: HistoryTracker::with_limit(config.history_limit),
            selection: SelectionState::new(),
            clipboard,
            tool: ToolKind::default(),
        }
    }

    /// Open a pattern from the store.
    ///
    /// Switching to a different id clears the selection and starts a fresh
    /// history. Reopening the same id (e.g. after the stored object was
    /// replaced by a reload) keeps the undo stacks. Returns false when the
    /// pattern does not exist.
    pub fn open(&mut self, store: &Store, pattern_id: &str) -> bool {
        let Some(pattern) = store.project().pattern(pattern_id) else {
            log::debug!("open: unknown pattern {}", pattern_id);
            return false;
        };
        if self.pattern_id.as_deref() != Some(pattern_id) {
            self.selection.clear_selection();
            self.pattern_id = Some(pattern_id.to_string());
        }
        self.history.sync(pattern_id, &pattern.grid);
        true
    }

    /// Forget the open pattern.
    pub fn close(&mut self) {
        self.pattern_id = None;
        self.history.reset();
        self.selection.clear_selection();
    }

    pub fn pattern_id(&self) -> Option<&str> {
        self.pattern_id.as_deref()
    }

    /// The grid being edited.
    pub fn grid(&self) -> Option<&Grid> {
        self.history.present()
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. Leaving or entering a tool drops the selection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            self.selection.clear_selection();
            self.tool = tool;
        }
    }

    /// Record `grid` as one history step and write it to the store.
    /// Grids equal to the present are not recorded.
    fn commit(&mut self, store: &mut Store, grid: Grid) -> bool {
        let Some(id) = self.pattern_id.clone() else {
            return false;
        };
        let Some(state) = self.history.state_mut() else {
            return false;
        };
        if state.present == grid {
            return false;
        }
        state.apply_change(&grid);
        store.update_pattern(&id, PatternUpdate::grid(grid))
    }

    /// Write the present grid back after undo/redo.
    fn write_present(&mut self, store: &mut Store) {
        if let (Some(id), Some(grid)) = (self.pattern_id.as_deref(), self.history.present()) {
            store.update_pattern(id, PatternUpdate::grid(grid.clone()));
        }
    }

    /// Whether a cell may hold a bead: inside the grid and, when the
    /// pattern's shape is known, inside its mask.
    fn is_paintable(&self, store: &Store, x: i32, y: i32) -> bool {
        let Some(grid) = self.grid() else {
            return false;
        };
        let in_grid = index(y, grid.len())
            .and_then(|y| index(x, grid[y].len()))
            .is_some();
        if !in_grid {
            return false;
        }
        let project = store.project();
        let shape = self
            .pattern_id
            .as_deref()
            .and_then(|id| project.pattern(id))
            .and_then(|p| project.shape(&p.shape_id));
        shape.is_none_or(|shape| is_cell_in_shape(shape, x, y))
    }

    // --- Cell tools ---

    pub fn pencil(&mut self, store: &mut Store, x: i32, y: i32, color: &str) -> bool {
        if !self.is_paintable(store, x, y) {
            return false;
        }
        let Some(next) = self.grid().map(|g| apply_pencil(g, x, y, color)) else {
            return false;
        };
        self.commit(store, next)
    }

    pub fn erase(&mut self, store: &mut Store, x: i32, y: i32) -> bool {
        let Some(next) = self.grid().map(|g| apply_eraser(g, x, y)) else {
            return false;
        };
        self.commit(store, next)
    }

    /// Flood fill. Filling with the seed's own color records nothing.
    pub fn fill(&mut self, store: &mut Store, x: i32, y: i32, color: Option<&str>) -> bool {
        if !self.is_paintable(store, x, y) {
            return false;
        }
        let project = store.snapshot();
        let shape = self
            .pattern_id
            .as_deref()
            .and_then(|id| project.pattern(id))
            .and_then(|p| project.shape(&p.shape_id));

        let Some(grid) = self.grid() else {
            return false;
        };
        let next = match apply_fill(grid, x, y, color) {
            Cow::Borrowed(_) => return false,
            Cow::Owned(filled) => match shape {
                Some(shape) => restore_outside_shape(grid, filled, shape),
                None => filled,
            },
        };
        self.commit(store, next)
    }

    pub fn replace_color(&mut self, store: &mut Store, from: &str, to: &str) -> bool {
        let Some(next) = self.grid().map(|g| replace_color(g, from, to)) else {
            return false;
        };
        self.commit(store, next)
    }

    pub fn mirror_horizontal(&mut self, store: &mut Store) -> bool {
        let Some(next) = self.grid().map(mirror_grid_horizontally) else {
            return false;
        };
        self.commit(store, next)
    }

    pub fn mirror_vertical(&mut self, store: &mut Store) -> bool {
        let Some(next) = self.grid().map(mirror_grid_vertically) else {
            return false;
        };
        self.commit(store, next)
    }

    /// Apply `tool` at a cell. `color` is used by pencil and fill.
    pub fn apply_tool(
        &mut self,
        store: &mut Store,
        tool: ToolKind,
        x: i32,
        y: i32,
        color: Option<&str>,
    ) -> ToolOutcome {
        self.set_tool(tool);
        let changed = match tool {
            ToolKind::Pencil => color.is_some_and(|c| self.pencil(store, x, y, c)),
            ToolKind::Eraser => self.erase(store, x, y),
            ToolKind::Fill => self.fill(store, x, y, color),
            ToolKind::Select => {
                self.begin_selection(x, y);
                return ToolOutcome::Selecting;
            }
            ToolKind::Eyedropper => {
                let picked = self.grid().and_then(|g| cell_at(g, x, y)).map(str::to_string);
                return ToolOutcome::Picked(picked);
            }
        };
        if changed {
            ToolOutcome::Changed
        } else {
            ToolOutcome::Unchanged
        }
    }

    // --- History ---

    pub fn undo(&mut self, store: &mut Store) -> bool {
        let undone = self.history.state_mut().is_some_and(|s| s.undo());
        if undone {
            self.write_present(store);
        }
        undone
    }

    pub fn redo(&mut self, store: &mut Store) -> bool {
        let redone = self.history.state_mut().is_some_and(|s| s.redo());
        if redone {
            self.write_present(store);
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Selection & clipboard ---

    pub fn begin_selection(&mut self, x: i32, y: i32) {
        self.selection.begin_selection(x, y);
    }

    pub fn update_selection(&mut self, x: i32, y: i32) {
        self.selection.update_selection(x, y);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    fn selected_region(&self) -> Option<(CellRect, Grid)> {
        let rect = self.selection.rect()?;
        let grid = self.grid()?;
        Some((rect, copy_region(grid, rect)))
    }

    /// Copy the selected cells to the shared clipboard.
    pub fn copy_selection(&self) -> bool {
        match self.selected_region() {
            Some((_, region)) => {
                self.clipboard.set(region);
                true
            }
            None => false,
        }
    }

    /// Copy the selection to the clipboard and empty it (one history step).
    pub fn cut_selection(&mut self, store: &mut Store) -> bool {
        let Some((rect, region)) = self.selected_region() else {
            return false;
        };
        self.clipboard.set(region);
        let Some(next) = self.grid().map(|g| clear_region(g, rect)) else {
            return false;
        };
        self.commit(store, next)
    }

    /// Paste the clipboard at the selection's top-left (one history step).
    pub fn paste_selection(&mut self, store: &mut Store) -> bool {
        let (Some(rect), Some(region)) = (self.selection.rect(), self.clipboard.get()) else {
            return false;
        };
        let Some(next) = self.grid().map(|g| paste_region(g, rect.x, rect.y, &region)) else {
            return false;
        };
        self.commit(store, next)
    }

    /// Move the selected cells by `(dx, dy)` and the selection with them
    /// (one history step).
    pub fn nudge_selection(&mut self, store: &mut Store, dx: i32, dy: i32) -> bool {
        let Some(rect) = self.selection.rect() else {
            return false;
        };
        let Some(next) = self.grid().map(|g| move_region(g, rect, dx, dy)) else {
            return false;
        };
        if !self.commit(store, next) {
            return false;
        }
        self.selection.shift(dx, dy);
        true
    }

    pub fn nudge_selection_right(&mut self, store: &mut Store) -> bool {
        self.nudge_selection(store, 1, 0)
    }
}

/// Undo flood changes that landed outside the shape. Cells the flood
/// did not touch keep their value.
fn restore_outside_shape(original: &Grid, mut filled: Grid, shape: &PegboardShape) -> Grid {
    for (y, (row, before)) in filled.iter_mut().zip(original).enumerate() {
        for (x, (cell, old)) in row.iter_mut().zip(before).enumerate() {
            if cell != old && !is_cell_in_shape(shape, x as i32, y as i32) {
                *cell = old.clone();
            }
        }
    }
    filled
}
