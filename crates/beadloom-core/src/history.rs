//! Linear undo/redo over grid snapshots.

use crate::grid::{Grid, clone_grid};
use crate::pattern::PatternId;

/// Past/present/future grid stacks for one editing session.
///
/// `past` runs oldest to newest, `future` newest-undone first. Every entry is
/// an independent deep copy; nothing here aliases the caller's grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    pub past: Vec<Grid>,
    pub present: Grid,
    pub future: Vec<Grid>,
    /// Maximum length of `past`. `None` keeps everything.
    limit: Option<usize>,
}

impl HistoryState {
    /// Start a history at `grid` with empty stacks.
    pub fn init(grid: &Grid) -> Self {
        Self {
            past: Vec::new(),
            present: clone_grid(grid),
            future: Vec::new(),
            limit: None,
        }
    }

    /// Start a history that keeps at most `limit` undo steps.
    pub fn with_limit(grid: &Grid, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::init(grid)
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record `grid` as the new present. Clears the redo stack.
    pub fn apply_change(&mut self, grid: &Grid) {
        let previous = std::mem::replace(&mut self.present, clone_grid(grid));
        self.past.push(previous);
        self.future.clear();

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Step back. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.insert(0, current);
        true
    }

    /// Step forward. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.future.is_empty() {
            return false;
        }
        let next = self.future.remove(0);
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// A copy of the present grid.
    pub fn present(&self) -> Grid {
        clone_grid(&self.present)
    }
}

/// Keeps one [`HistoryState`] for whichever pattern is being edited.
///
/// The history follows the pattern *id*: syncing with the same id but a new
/// grid payload (say, after an autosave reload) leaves the stacks alone;
/// syncing with a different id starts over.
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    pattern_id: Option<PatternId>,
    state: Option<HistoryState>,
    limit: Option<usize>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker whose histories keep at most `limit` undo steps.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Point the tracker at a pattern. Returns true if the history was reset.
    ///
    /// The same id with a different grid only refreshes `present`; the undo
    /// and redo stacks are kept.
    pub fn sync(&mut self, pattern_id: &str, grid: &Grid) -> bool {
        if self.pattern_id.as_deref() == Some(pattern_id) {
            if let Some(state) = self.state.as_mut() {
                if state.present != *grid {
                    state.present = clone_grid(grid);
                }
                return false;
            }
        }
        log::debug!("Resetting history for pattern {}", pattern_id);
        self.pattern_id = Some(pattern_id.to_string());
        self.state = Some(match self.limit {
            Some(limit) => HistoryState::with_limit(grid, limit),
            None => HistoryState::init(grid),
        });
        true
    }

    /// Drop the tracked history.
    pub fn reset(&mut self) {
        self.pattern_id = None;
        self.state = None;
    }

    pub fn pattern_id(&self) -> Option<&str> {
        self.pattern_id.as_deref()
    }

    pub fn state(&self) -> Option<&HistoryState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut HistoryState> {
        self.state.as_mut()
    }

    /// The present grid of the tracked pattern.
    pub fn present(&self) -> Option<&Grid> {
        self.state.as_ref().map(|s| &s.present)
    }

    pub fn can_undo(&self) -> bool {
        self.state.as_ref().is_some_and(HistoryState::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.state.as_ref().is_some_and(HistoryState::can_redo)
    }
}
