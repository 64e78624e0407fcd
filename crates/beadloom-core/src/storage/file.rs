//! JSON-file storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::store::Project;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each project as `<id>.json` in one directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Use `base_path`, creating it if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Storage in the per-user data directory.
    ///
    /// On Linux: `~/.local/share/beadloom/projects/`
    /// On Windows: `%LOCALAPPDATA%\beadloom\projects\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("beadloom").join("projects"))
    }

    fn project_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, project: &Project) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.project_path(id);
        let json = project.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
            log::info!("Saved project to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Project>> {
        let path = self.project_path(id);
        let id = id.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id));
            }
            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
            let project = Project::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            log::info!(
                "Loaded project {} ({} patterns, {} groups)",
                id,
                project.patterns.len(),
                project.groups.len()
            );
            Ok(project)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.project_path(id);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();
        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut ids = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|e| e == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        ids.push(stem.to_string());
                    }
                }
            }
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.project_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BeadColor, BeadPalette, Rgb};
    use crate::pattern::BeadPattern;
    use crate::shapes::PegboardShape;
    use crate::storage::block_on;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn sample_project() -> Project {
        let shape = PegboardShape::circle(5);
        let palette = BeadPalette::new(
            "hama",
            "Hama Midi",
            vec![BeadColor::new("h01", "White", Rgb::new(255, 255, 255))],
        );
        let mut pattern = BeadPattern::new("Flower", &shape, "hama", None);
        pattern.grid[2][2] = Some("h01".to_string());

        let mut project = Project::new();
        project.patterns.insert(pattern.id.clone(), Arc::new(pattern));
        project.palettes.insert(palette.id.clone(), Arc::new(palette));
        project.shapes.insert(shape.id.clone(), Arc::new(shape));
        project
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let project = sample_project();

        block_on(storage.save("my-project", &project)).unwrap();
        let loaded = block_on(storage.load("my-project")).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let result = block_on(storage.load("broken"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_list_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        block_on(storage.save("p1", &Project::new())).unwrap();
        block_on(storage.save("p2", &Project::new())).unwrap();
        let mut list = block_on(storage.list()).unwrap();
        list.sort();
        assert_eq!(list, vec!["p1".to_string(), "p2".to_string()]);

        block_on(storage.delete("p1")).unwrap();
        assert!(!block_on(storage.exists("p1")).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let project = sample_project();

        block_on(storage.save("beads/set:one*", &project)).unwrap();
        assert!(dir.path().join("beads_set_one_.json").exists());
        let loaded = block_on(storage.load("beads/set:one*")).unwrap();
        assert_eq!(loaded, project);
    }
}
