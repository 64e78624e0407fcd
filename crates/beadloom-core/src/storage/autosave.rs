//! Debounced saving of the open project.

use crate::config::{DEFAULT_AUTOSAVE_INTERVAL_SECS, EditorConfig};
use crate::storage::{FileStorage, Storage, StorageResult};
use crate::store::Project;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Key under which the most recently saved project is mirrored.
pub const LAST_PROJECT_KEY: &str = "__last_project__";

/// Saves a project at most once per interval while it has unsaved changes.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    dirty: bool,
    project_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            project_id: None,
        }
    }

    /// A manager using the configured interval.
    pub fn with_config(storage: Arc<S>, config: &EditorConfig) -> Self {
        let mut manager = Self::new(storage);
        manager.interval = config.autosave_interval();
        manager
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_project_id(&mut self, id: Option<String>) {
        self.project_id = id;
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Dirty and the interval has elapsed since the last save.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if [`should_save`](Self::should_save). Failures are logged and
    /// leave the manager dirty so the next tick retries.
    pub async fn maybe_save(&mut self, project: &Project) -> bool {
        if !self.should_save() {
            return false;
        }
        match self.save(project).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Autosave failed: {}", e);
                false
            }
        }
    }

    /// Save now. A project without an id gets a fresh one.
    pub async fn save(&mut self, project: &Project) -> StorageResult<()> {
        let id = self
            .project_id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        self.storage.save(&id, project).await?;
        self.storage.save(LAST_PROJECT_KEY, project).await?;

        self.last_save = Some(Instant::now());
        self.dirty = false;
        Ok(())
    }

    pub async fn load(&mut self, id: &str) -> StorageResult<Project> {
        let project = self.storage.load(id).await?;
        self.project_id = Some(id.to_string());
        self.dirty = false;
        self.last_save = Some(Instant::now());
        Ok(project)
    }

    /// The most recently saved project, if any. Its original id is unknown,
    /// so the next save goes under a new id unless one is set.
    pub async fn load_last(&mut self) -> Option<Project> {
        match self.storage.load(LAST_PROJECT_KEY).await {
            Ok(project) => {
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Some(project)
            }
            Err(e) => {
                log::debug!("No last project: {}", e);
                None
            }
        }
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }

    /// Saved project ids, without the last-project mirror.
    pub async fn list_projects(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_PROJECT_KEY);
        Ok(ids)
    }

    pub async fn exists(&self, id: &str) -> StorageResult<bool> {
        self.storage.exists(id).await
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// File storage in the per-user data directory.
pub fn create_default_storage() -> StorageResult<Arc<FileStorage>> {
    Ok(Arc::new(FileStorage::default_location()?))
}

pub type DefaultAutoSaveManager = AutoSaveManager<FileStorage>;

pub fn create_autosave_manager() -> StorageResult<DefaultAutoSaveManager> {
    Ok(AutoSaveManager::new(create_default_storage()?))
}
