//! Editing tools.

use crate::color::ColorId;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Select,
    Eyedropper,
}

impl ToolKind {
    /// Whether the tool changes the grid when applied to a cell.
    pub fn edits_grid(self) -> bool {
        matches!(self, ToolKind::Pencil | ToolKind::Eraser | ToolKind::Fill)
    }

    /// Whether the tool needs a color to paint with.
    pub fn needs_color(self) -> bool {
        matches!(self, ToolKind::Pencil | ToolKind::Fill)
    }

    /// Cycle to the next tool.
    pub fn next(self) -> Self {
        match self {
            ToolKind::Pencil => ToolKind::Eraser,
            ToolKind::Eraser => ToolKind::Fill,
            ToolKind::Fill => ToolKind::Select,
            ToolKind::Select => ToolKind::Eyedropper,
            ToolKind::Eyedropper => ToolKind::Pencil,
        }
    }
}

/// Result of applying a tool to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The grid changed and one history step was recorded.
    Changed,
    /// Nothing changed; no history step.
    Unchanged,
    /// The eyedropper read a cell.
    Picked(Option<ColorId>),
    /// A selection was started.
    Selecting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(ToolKind::default(), ToolKind::Pencil);
    }

    #[test]
    fn test_tool_cycle_returns_to_start() {
        let mut tool = ToolKind::Pencil;
        for _ in 0..5 {
            tool = tool.next();
        }
        assert_eq!(tool, ToolKind::Pencil);
    }

    #[test]
    fn test_tool_capabilities() {
        assert!(ToolKind::Fill.edits_grid());
        assert!(!ToolKind::Select.edits_grid());
        assert!(!ToolKind::Eraser.needs_color());
    }
}
