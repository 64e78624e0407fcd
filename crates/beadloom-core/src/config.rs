//! Editor configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest grid side the editor and importer accept.
pub const MAX_GRID_DIMENSION: usize = 256;

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Tunables for editor sessions and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Largest `cols`/`rows` for new patterns and conversions.
    pub max_grid_dimension: usize,
    /// Maximum undo steps per session. `None` keeps every step.
    pub history_limit: Option<usize>,
    /// Minimum seconds between automatic saves.
    pub autosave_interval_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_grid_dimension: MAX_GRID_DIMENSION,
            history_limit: None,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
        }
    }
}

impl EditorConfig {
    /// Parse a config, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    /// Check a grid size against `max_grid_dimension`.
    pub fn accepts_dimensions(&self, cols: usize, rows: usize) -> bool {
        cols > 0 && rows > 0 && cols <= self.max_grid_dimension && rows <= self.max_grid_dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "historyLimit": 100 }"#).unwrap();
        assert_eq!(config.history_limit, Some(100));
        assert_eq!(config.max_grid_dimension, MAX_GRID_DIMENSION);
        assert_eq!(config.autosave_interval_secs, DEFAULT_AUTOSAVE_INTERVAL_SECS);
    }

    #[test]
    fn test_accepts_dimensions() {
        let config = EditorConfig::default();
        assert!(config.accepts_dimensions(29, 29));
        assert!(!config.accepts_dimensions(0, 29));
        assert!(!config.accepts_dimensions(MAX_GRID_DIMENSION + 1, 1));
    }
}
