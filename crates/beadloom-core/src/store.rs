//! Project aggregate and the copy-on-write store around it.
//!
//! A [`Project`] owns every pattern, group, palette and shape by id. The
//! [`Store`] never mutates a published project: each change clones the
//! top-level maps (entities are `Arc`-shared), replaces the touched entity and
//! swaps the new snapshot in. Readers holding an older `Arc<Project>` keep a
//! consistent view.

use crate::color::{BeadColor, BeadPalette, ColorId, PaletteId};
use crate::pattern::{
    BeadPattern, DimensionGuide, GroupId, PartId, PatternGroup, PatternId, PatternPart,
    PatternUpdate,
};
use crate::shapes::{PegboardShape, ShapeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// The persisted aggregate: four id-keyed maps of plain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub patterns: HashMap<PatternId, Arc<BeadPattern>>,
    pub groups: HashMap<GroupId, Arc<PatternGroup>>,
    pub palettes: HashMap<PaletteId, Arc<BeadPalette>>,
    pub shapes: HashMap<ShapeId, Arc<PegboardShape>>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(&self, id: &str) -> Option<&BeadPattern> {
        self.patterns.get(id).map(Arc::as_ref)
    }

    pub fn group(&self, id: &str) -> Option<&PatternGroup> {
        self.groups.get(id).map(Arc::as_ref)
    }

    pub fn palette(&self, id: &str) -> Option<&BeadPalette> {
        self.palettes.get(id).map(Arc::as_ref)
    }

    pub fn shape(&self, id: &str) -> Option<&PegboardShape> {
        self.shapes.get(id).map(Arc::as_ref)
    }

    /// Find a color in any palette.
    pub fn find_color(&self, id: &str) -> Option<&BeadColor> {
        self.palettes.values().find_map(|p| p.color(id))
    }

    /// Patterns that are not embedded in a group.
    pub fn standalone_patterns(&self) -> impl Iterator<Item = &BeadPattern> {
        self.patterns
            .values()
            .map(Arc::as_ref)
            .filter(|p| p.belongs_to_group_id.is_none())
    }

    /// The group that embeds a pattern, if any.
    pub fn group_of(&self, pattern_id: &str) -> Option<&PatternGroup> {
        let group_id = self.pattern(pattern_id)?.belongs_to_group_id.as_deref()?;
        self.group(group_id)
    }

    /// Serialize the project to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What changed in a store commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    PatternCreated(PatternId),
    PatternUpdated(PatternId),
    PatternDeleted(PatternId),
    GroupCreated(GroupId),
    GroupUpdated(GroupId),
    GroupDeleted(GroupId),
    PaletteChanged(PaletteId),
    ShapeChanged(ShapeId),
    Replaced,
}

/// Handle returned by [`Store::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&StoreEvent, &Arc<Project>)>;

/// Single-owner holder of the current project snapshot.
pub struct Store {
    project: Arc<Project>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Project::new())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("project", &self.project)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    pub fn new(project: Project) -> Self {
        Self {
            project: Arc::new(project),
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// The current snapshot. Later commits never change it.
    pub fn snapshot(&self) -> Arc<Project> {
        Arc::clone(&self.project)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Register a listener called synchronously after every commit.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent, &Arc<Project>) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: Project, events: Vec<StoreEvent>) {
        self.project = Arc::new(next);
        for event in &events {
            for (_, listener) in &self.listeners {
                listener(event, &self.project);
            }
        }
    }

    /// Swap in a whole project, e.g. after loading from storage.
    pub fn replace(&mut self, project: Project) {
        self.commit(project, vec![StoreEvent::Replaced]);
    }

    // --- Palettes & shapes ---

    pub fn upsert_palette(&mut self, palette: BeadPalette) {
        let mut next = (*self.project).clone();
        let id = palette.id.clone();
        next.palettes.insert(id.clone(), Arc::new(palette));
        self.commit(next, vec![StoreEvent::PaletteChanged(id)]);
    }

    pub fn upsert_shape(&mut self, shape: PegboardShape) {
        let mut next = (*self.project).clone();
        let id = shape.id.clone();
        next.shapes.insert(id.clone(), Arc::new(shape));
        self.commit(next, vec![StoreEvent::ShapeChanged(id)]);
    }

    // --- Patterns ---

    /// Add a pattern. Returns its id.
    pub fn create_pattern(&mut self, pattern: BeadPattern) -> PatternId {
        let mut next = (*self.project).clone();
        let id = pattern.id.clone();
        next.patterns.insert(id.clone(), Arc::new(pattern));
        self.commit(next, vec![StoreEvent::PatternCreated(id.clone())]);
        id
    }

    /// Apply a partial update to a pattern. Returns false for unknown ids.
    pub fn update_pattern(&mut self, id: &str, update: PatternUpdate) -> bool {
        let Some(current) = self.project.patterns.get(id) else {
            log::debug!("update_pattern: unknown pattern {}", id);
            return false;
        };
        let mut pattern = BeadPattern::clone(current);
        pattern.apply(update);

        let mut next = (*self.project).clone();
        next.patterns.insert(id.to_string(), Arc::new(pattern));
        self.commit(next, vec![StoreEvent::PatternUpdated(id.to_string())]);
        true
    }

    /// Delete a pattern and every group part that points at it.
    pub fn delete_pattern(&mut self, id: &str) -> bool {
        if !self.project.patterns.contains_key(id) {
            log::debug!("delete_pattern: unknown pattern {}", id);
            return false;
        }
        let mut next = (*self.project).clone();
        next.patterns.remove(id);

        let mut events = vec![StoreEvent::PatternDeleted(id.to_string())];
        for (group_id, group) in next.groups.iter_mut() {
            if group.parts.iter().any(|part| part.pattern_id == id) {
                let mut updated = PatternGroup::clone(group);
                updated.parts.retain(|part| part.pattern_id != id);
                *group = Arc::new(updated);
                events.push(StoreEvent::GroupUpdated(group_id.clone()));
            }
        }
        self.commit(next, events);
        true
    }

    // --- Active colors ---

    pub fn set_active_colors(&mut self, pattern_id: &str, ids: Option<Vec<ColorId>>) -> bool {
        self.update_pattern(pattern_id, PatternUpdate::active_colors(ids))
    }

    /// Enable a color for painting. A pattern without an explicit list first
    /// materializes its palette's colors, so colors from other palettes can
    /// be added on top.
    pub fn add_active_color(&mut self, pattern_id: &str, color_id: &str) -> bool {
        let Some(mut ids) = self.resolved_active_ids(pattern_id) else {
            return false;
        };
        if ids.iter().any(|id| id == color_id) {
            return false;
        }
        ids.push(color_id.to_string());
        self.set_active_colors(pattern_id, Some(ids))
    }

    /// Disable a color for painting.
    pub fn remove_active_color(&mut self, pattern_id: &str, color_id: &str) -> bool {
        let Some(mut ids) = self.resolved_active_ids(pattern_id) else {
            return false;
        };
        let before = ids.len();
        ids.retain(|id| id != color_id);
        if ids.len() == before {
            return false;
        }
        self.set_active_colors(pattern_id, Some(ids))
    }

    fn resolved_active_ids(&self, pattern_id: &str) -> Option<Vec<ColorId>> {
        let pattern = self.project.pattern(pattern_id)?;
        Some(match &pattern.active_color_ids {
            Some(ids) => ids.clone(),
            None => self
                .project
                .palette(&pattern.palette_id)
                .map(BeadPalette::color_ids)
                .unwrap_or_default(),
        })
    }

    // --- Groups ---

    pub fn create_group(&mut self, group: PatternGroup) -> GroupId {
        let mut next = (*self.project).clone();
        let id = group.id.clone();
        next.groups.insert(id.clone(), Arc::new(group));
        self.commit(next, vec![StoreEvent::GroupCreated(id.clone())]);
        id
    }

    /// Edit a group in place on a private copy. Returns false for unknown ids.
    pub fn update_group(&mut self, id: &str, edit: impl FnOnce(&mut PatternGroup)) -> bool {
        let Some(current) = self.project.groups.get(id) else {
            log::debug!("update_group: unknown group {}", id);
            return false;
        };
        let mut group = PatternGroup::clone(current);
        edit(&mut group);
        group.id = id.to_string();

        let mut next = (*self.project).clone();
        next.groups.insert(id.to_string(), Arc::new(group));
        self.commit(next, vec![StoreEvent::GroupUpdated(id.to_string())]);
        true
    }

    pub fn rename_group(&mut self, id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update_group(id, |group| group.name = name)
    }

    /// Delete a group and every pattern embedded in it. Standalone patterns
    /// referenced by its parts survive.
    pub fn delete_group(&mut self, id: &str) -> bool {
        if !self.project.groups.contains_key(id) {
            log::debug!("delete_group: unknown group {}", id);
            return false;
        }
        let mut next = (*self.project).clone();
        next.groups.remove(id);

        let embedded: Vec<PatternId> = next
            .patterns
            .values()
            .filter(|p| p.belongs_to_group_id.as_deref() == Some(id))
            .map(|p| p.id.clone())
            .collect();
        let mut events = Vec::with_capacity(embedded.len() + 1);
        for pattern_id in embedded {
            next.patterns.remove(&pattern_id);
            events.push(StoreEvent::PatternDeleted(pattern_id));
        }
        events.push(StoreEvent::GroupDeleted(id.to_string()));
        self.commit(next, events);
        true
    }

    // --- Parts ---

    /// Append a part referring to an existing pattern.
    pub fn add_part(&mut self, group_id: &str, part: PatternPart) -> bool {
        self.update_group(group_id, |group| group.parts.push(part))
    }

    /// Create a pattern embedded in a group, plus the part pointing at it.
    pub fn add_part_with_pattern(
        &mut self,
        group_id: &str,
        part_name: impl Into<String>,
        mut pattern: BeadPattern,
    ) -> Option<PartId> {
        if !self.project.groups.contains_key(group_id) {
            log::debug!("add_part_with_pattern: unknown group {}", group_id);
            return None;
        }
        let part = PatternPart::new(part_name, pattern.id.clone());
        let part_id = part.id.clone();
        pattern.belongs_to_group_id = Some(group_id.to_string());
        pattern.belongs_to_part_id = Some(part_id.clone());

        let mut next = (*self.project).clone();
        let pattern_id = pattern.id.clone();
        next.patterns.insert(pattern_id.clone(), Arc::new(pattern));
        if let Some(group) = next.groups.get_mut(group_id) {
            let mut updated = PatternGroup::clone(group);
            updated.parts.push(part);
            *group = Arc::new(updated);
        }
        self.commit(
            next,
            vec![
                StoreEvent::PatternCreated(pattern_id),
                StoreEvent::GroupUpdated(group_id.to_string()),
            ],
        );
        Some(part_id)
    }

    pub fn rename_part(&mut self, group_id: &str, part_id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        let exists = self
            .project
            .group(group_id)
            .is_some_and(|g| g.part(part_id).is_some());
        exists
            && self.update_group(group_id, |group| {
                if let Some(part) = group.parts.iter_mut().find(|p| p.id == part_id) {
                    part.name = name;
                }
            })
    }

    /// Remove a part. A pattern embedded through this part is deleted with it.
    pub fn remove_part(&mut self, group_id: &str, part_id: &str) -> bool {
        let Some(part) = self
            .project
            .group(group_id)
            .and_then(|g| g.part(part_id))
            .cloned()
        else {
            return false;
        };

        let mut next = (*self.project).clone();
        let mut events = Vec::new();
        if let Some(group) = next.groups.get_mut(group_id) {
            let mut updated = PatternGroup::clone(group);
            updated.parts.retain(|p| p.id != part_id);
            *group = Arc::new(updated);
        }
        let embedded = next
            .patterns
            .get(&part.pattern_id)
            .is_some_and(|p| p.belongs_to_group_id.as_deref() == Some(group_id));
        if embedded {
            next.patterns.remove(&part.pattern_id);
            events.push(StoreEvent::PatternDeleted(part.pattern_id));
        }
        events.push(StoreEvent::GroupUpdated(group_id.to_string()));
        self.commit(next, events);
        true
    }

    /// Move the part at `from` to position `to`. Out-of-range indices are ignored.
    pub fn reorder_parts(&mut self, group_id: &str, from: usize, to: usize) -> bool {
        let len = match self.project.group(group_id) {
            Some(group) => group.parts.len(),
            None => return false,
        };
        if from >= len || to >= len || from == to {
            return false;
        }
        self.update_group(group_id, |group| {
            let part = group.parts.remove(from);
            group.parts.insert(to, part);
        })
    }

    // --- Dimension guides ---

    pub fn add_dimension_guide(&mut self, group_id: &str, guide: DimensionGuide) -> bool {
        self.update_group(group_id, |group| group.dimension_guides_mut().push(guide))
    }

    /// Replace the guide with the same id.
    pub fn update_dimension_guide(&mut self, group_id: &str, guide: DimensionGuide) -> bool {
        let guide_id = guide.id.clone();
        let exists = self
            .project
            .group(group_id)
            .is_some_and(|g| g.dimension_guides().iter().any(|d| d.id == guide_id));
        exists
            && self.update_group(group_id, |group| {
                let guides = group.dimension_guides_mut();
                if let Some(slot) = guides.iter_mut().find(|d| d.id == guide_id) {
                    *slot = guide;
                }
            })
    }

    pub fn remove_dimension_guide(&mut self, group_id: &str, guide_id: &str) -> bool {
        let exists = self
            .project
            .group(group_id)
            .is_some_and(|g| g.dimension_guides().iter().any(|d| d.id == guide_id));
        exists
            && self.update_group(group_id, |group| {
                group.dimension_guides_mut().retain(|d| d.id != guide_id)
            })
    }
}
