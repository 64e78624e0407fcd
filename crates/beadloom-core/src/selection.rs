//! Rectangular cell selection and the shared region clipboard.

use crate::grid::{Grid, clone_grid};
use crate::region::{CellRect, normalise_rect};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Drag-to-select state for one editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    anchor: Option<(i32, i32)>,
    rect: Option<CellRect>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a selection at a cell: anchor it and select that one cell.
    pub fn begin_selection(&mut self, x: i32, y: i32) {
        self.anchor = Some((x, y));
        self.rect = Some(CellRect::cell(x, y));
    }

    /// Stretch the selection from the anchor to `(x, y)`. Ignored when no
    /// selection has begun.
    pub fn update_selection(&mut self, x: i32, y: i32) {
        if let Some(anchor) = self.anchor {
            self.rect = Some(normalise_rect(anchor, (x, y)));
        }
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
        self.rect = None;
    }

    pub fn rect(&self) -> Option<CellRect> {
        self.rect
    }

    pub fn anchor(&self) -> Option<(i32, i32)> {
        self.anchor
    }

    pub fn is_active(&self) -> bool {
        self.rect.is_some()
    }

    /// Move the rect and anchor together.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        if let Some(rect) = self.rect.as_mut() {
            *rect = rect.translate(dx, dy);
        }
        if let Some((ax, ay)) = self.anchor.as_mut() {
            *ax += dx;
            *ay += dy;
        }
    }
}

/// Handle returned by [`Clipboard::subscribe`].
pub type ClipboardSubscription = u64;

type ClipboardListener = Arc<dyn Fn(Option<&Grid>) + Send + Sync>;

#[derive(Default)]
struct ClipboardInner {
    content: RwLock<Option<Grid>>,
    listeners: Mutex<Vec<(ClipboardSubscription, ClipboardListener)>>,
    next_id: AtomicU64,
}

/// Region clipboard shared by every editor session.
///
/// Cloning the handle shares the same clipboard; [`Clipboard::new`] makes an
/// independent one. Content is replaced wholesale and listeners are called
/// synchronously after each write, outside of any lock.
#[derive(Clone, Default)]
pub struct Clipboard {
    inner: Arc<ClipboardInner>,
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("has_content", &self.has_content())
            .finish()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current region.
    pub fn get(&self) -> Option<Grid> {
        let content = self.inner.content.read().unwrap_or_else(PoisonError::into_inner);
        content.as_ref().map(clone_grid)
    }

    pub fn has_content(&self) -> bool {
        self.inner
            .content
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the clipboard content.
    pub fn set(&self, region: Grid) {
        self.write(Some(region));
    }

    pub fn clear(&self) {
        self.write(None);
    }

    fn write(&self, value: Option<Grid>) {
        let snapshot = value.as_ref().map(clone_grid);
        *self.inner.content.write().unwrap_or_else(PoisonError::into_inner) = value;

        let listeners: Vec<ClipboardListener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(snapshot.as_ref());
        }
    }

    /// Call `listener` after every write with the new content.
    pub fn subscribe(
        &self,
        listener: impl Fn(Option<&Grid>) + Send + Sync + 'static,
    ) -> ClipboardSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ClipboardSubscription) -> bool {
        let mut listeners = self.inner.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }
}
