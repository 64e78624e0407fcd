//! Patterns, multi-part groups and dimension guides.

use crate::color::{BeadColor, BeadPalette, ColorId, PaletteId};
use crate::grid::{Grid, create_empty_grid, is_grid_rectangular};
use crate::shapes::{PegboardShape, ShapeId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub type PatternId = String;
pub type GroupId = String;
pub type PartId = String;
pub type GuideId = String;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One bead grid drawn on a pegboard shape with a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeadPattern {
    pub id: PatternId,
    pub name: String,
    pub shape_id: ShapeId,
    pub cols: usize,
    pub rows: usize,
    pub palette_id: PaletteId,
    /// Colors enabled for painting. `None` means the whole palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_color_ids: Option<Vec<ColorId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to_group_id: Option<GroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to_part_id: Option<PartId>,
    pub grid: Grid,
    pub created_at: u64,
    pub updated_at: u64,
}

impl BeadPattern {
    /// Create a pattern sized to `shape`. Without a grid an empty one is made.
    pub fn new(
        name: impl Into<String>,
        shape: &PegboardShape,
        palette_id: impl Into<PaletteId>,
        grid: Option<Grid>,
    ) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            shape_id: shape.id.clone(),
            cols: shape.cols,
            rows: shape.rows,
            palette_id: palette_id.into(),
            active_color_ids: None,
            belongs_to_group_id: None,
            belongs_to_part_id: None,
            grid: grid.unwrap_or_else(|| create_empty_grid(shape.cols, shape.rows)),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. `updated_at` is always refreshed.
    pub fn apply(&mut self, update: PatternUpdate) {
        let PatternUpdate {
            name,
            shape_id,
            cols,
            rows,
            palette_id,
            active_color_ids,
            belongs_to_group_id,
            belongs_to_part_id,
            grid,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(shape_id) = shape_id {
            self.shape_id = shape_id;
        }
        if let Some(cols) = cols {
            self.cols = cols;
        }
        if let Some(rows) = rows {
            self.rows = rows;
        }
        if let Some(palette_id) = palette_id {
            self.palette_id = palette_id;
        }
        if let Some(active) = active_color_ids {
            self.active_color_ids = active;
        }
        if let Some(group) = belongs_to_group_id {
            self.belongs_to_group_id = group;
        }
        if let Some(part) = belongs_to_part_id {
            self.belongs_to_part_id = part;
        }
        if let Some(grid) = grid {
            self.grid = grid;
        }
        self.updated_at = now_millis().max(self.updated_at);
    }

    /// The colors a user may paint with.
    pub fn active_colors<'a>(&self, palette: &'a BeadPalette) -> Vec<&'a BeadColor> {
        match &self.active_color_ids {
            Some(ids) => ids.iter().filter_map(|id| palette.color(id)).collect(),
            None => palette.colors.iter().collect(),
        }
    }

    pub fn is_color_active(&self, id: &str) -> bool {
        match &self.active_color_ids {
            Some(ids) => ids.iter().any(|a| a == id),
            None => true,
        }
    }
}

/// Partial pattern update. `None` leaves a field alone; for optional fields
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternUpdate {
    pub name: Option<String>,
    pub shape_id: Option<ShapeId>,
    pub cols: Option<usize>,
    pub rows: Option<usize>,
    pub palette_id: Option<PaletteId>,
    pub active_color_ids: Option<Option<Vec<ColorId>>>,
    pub belongs_to_group_id: Option<Option<GroupId>>,
    pub belongs_to_part_id: Option<Option<PartId>>,
    pub grid: Option<Grid>,
}

impl PatternUpdate {
    pub fn grid(grid: Grid) -> Self {
        Self {
            grid: Some(grid),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn active_colors(ids: Option<Vec<ColorId>>) -> Self {
        Self {
            active_color_ids: Some(ids),
            ..Self::default()
        }
    }
}

/// Check the pattern's grid against its declared `cols`/`rows`.
pub fn is_pattern_grid_rectangular(pattern: &BeadPattern) -> bool {
    is_grid_rectangular(&pattern.grid, pattern.cols, pattern.rows)
}

/// Check that a pattern has the same dimensions as a shape.
pub fn is_pattern_compatible_with_shape(pattern: &BeadPattern, shape: &PegboardShape) -> bool {
    pattern.cols == shape.cols && pattern.rows == shape.rows
}

/// A named slot in a group, referring to a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternPart {
    pub id: PartId,
    pub name: String,
    pub pattern_id: PatternId,
}

impl PatternPart {
    pub fn new(name: impl Into<String>, pattern_id: impl Into<PatternId>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            pattern_id: pattern_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideReference {
    Top,
    Bottom,
    Left,
    Right,
}

/// An alignment line `cells` cells away from one edge, shared by every part
/// of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionGuide {
    pub id: GuideId,
    pub label: String,
    pub axis: GuideAxis,
    pub reference: GuideReference,
    pub cells: u32,
}

impl DimensionGuide {
    pub fn new(
        label: impl Into<String>,
        axis: GuideAxis,
        reference: GuideReference,
        cells: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            axis,
            reference,
            cells,
        }
    }

    /// Line index within a pattern of the given size, counted from the top
    /// (horizontal) or left (vertical) edge and clamped to the pattern.
    pub fn resolve(&self, cols: usize, rows: usize) -> usize {
        let cells = self.cells as usize;
        match self.reference {
            GuideReference::Top | GuideReference::Left => {
                let extent = if self.reference == GuideReference::Top { rows } else { cols };
                cells.min(extent)
            }
            GuideReference::Bottom => rows.saturating_sub(cells),
            GuideReference::Right => cols.saturating_sub(cells),
        }
    }
}

/// Group-level notes and guides for 3D assemblies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_guides: Option<Vec<DimensionGuide>>,
}

/// A multi-part 3D assembly. Part order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternGroup {
    pub id: GroupId,
    pub name: String,
    pub parts: Vec<PatternPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_metadata: Option<AssemblyMetadata>,
}

impl PatternGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            parts: Vec::new(),
            is_template: None,
            assembly_metadata: None,
        }
    }

    pub fn part(&self, part_id: &str) -> Option<&PatternPart> {
        self.parts.iter().find(|p| p.id == part_id)
    }

    /// Dimension guides, empty when there is no metadata.
    pub fn dimension_guides(&self) -> &[DimensionGuide] {
        self.assembly_metadata
            .as_ref()
            .and_then(|m| m.dimension_guides.as_deref())
            .unwrap_or(&[])
    }

    pub(crate) fn dimension_guides_mut(&mut self) -> &mut Vec<DimensionGuide> {
        self.assembly_metadata
            .get_or_insert_with(AssemblyMetadata::default)
            .dimension_guides
            .get_or_insert_with(Vec::new)
    }
}
