//! Beadloom core library
//!
//! Data model and editing logic for fuse-bead pegboard patterns: palettes,
//! pegboard shapes, cell grids, undo history, selections and the project
//! store. Nothing here touches a UI toolkit.

pub mod color;
pub mod config;
pub mod grid;
pub mod history;
pub mod pattern;
pub mod region;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod store;
pub mod tools;

pub use color::{BeadColor, BeadPalette, ColorError, ColorId, PaletteId, Rgb, nearest_palette_color};
pub use config::{EditorConfig, MAX_GRID_DIMENSION};
pub use grid::{Cell, Grid, create_empty_grid};
pub use history::{HistoryState, HistoryTracker};
pub use pattern::{
    BeadPattern, DimensionGuide, GroupId, GuideAxis, GuideReference, PartId, PatternGroup,
    PatternId, PatternPart, PatternUpdate,
};
pub use region::CellRect;
pub use selection::{Clipboard, SelectionState};
pub use session::EditorSession;
pub use shapes::{PegboardShape, ShapeId, ShapeKind, is_cell_in_shape};
pub use store::{Project, Store, StoreEvent};
pub use tools::{ToolKind, ToolOutcome};
