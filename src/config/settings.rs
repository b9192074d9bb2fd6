//! User settings for obs-toolkit
//!
//! Persists the folder pair used for snapshots, the name of the process that
//! must not be running during a backup or restore, and the defaults the
//! rename workflow starts from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ToolkitPaths;
use crate::error::ToolkitError;

/// Defaults for the bulk rename workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameDefaults {
    /// Regular expression matched against each relative path
    #[serde(default = "default_search_pattern")]
    pub search_pattern: String,

    /// Replacement template, `\1` style back-references allowed
    #[serde(default = "default_replacement_pattern")]
    pub replacement_pattern: String,

    /// Whether sub-folders are included
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

impl Default for RenameDefaults {
    fn default() -> Self {
        Self {
            search_pattern: default_search_pattern(),
            replacement_pattern: default_replacement_pattern(),
            recursive: default_recursive(),
        }
    }
}

/// User settings for obs-toolkit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Where snapshots are stored (defaults to `~/obs-backups`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backups_dir: Option<PathBuf>,

    /// The folder being snapshotted (defaults to the OBS config folder)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,

    /// Process name checked before mutating backup operations
    #[serde(default = "default_watched_process")]
    pub watched_process: String,

    /// Program used for mirror copies
    #[serde(default = "default_transfer_program")]
    pub transfer_program: String,

    /// Rename workflow defaults
    #[serde(default)]
    pub rename: RenameDefaults,
}

fn default_schema_version() -> u32 {
    1
}

fn default_watched_process() -> String {
    "obs".to_string()
}

fn default_transfer_program() -> String {
    "rsync".to_string()
}

fn default_search_pattern() -> String {
    "(?i)^(.*)[.]png$".to_string()
}

fn default_replacement_pattern() -> String {
    "\\1.png".to_string()
}

fn default_recursive() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backups_dir: None,
            source_dir: None,
            watched_process: default_watched_process(),
            transfer_program: default_transfer_program(),
            rename: RenameDefaults::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ToolkitPaths) -> Result<Self, ToolkitError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ToolkitError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ToolkitError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ToolkitPaths) -> Result<(), ToolkitError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ToolkitError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ToolkitError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolved snapshot root
    pub fn backups_dir(&self, paths: &ToolkitPaths) -> PathBuf {
        self.backups_dir
            .clone()
            .unwrap_or_else(|| paths.default_backups_dir())
    }

    /// Resolved watched folder
    pub fn source_dir(&self, paths: &ToolkitPaths) -> PathBuf {
        self.source_dir
            .clone()
            .unwrap_or_else(|| paths.default_source_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.watched_process, "obs");
        assert_eq!(settings.transfer_program, "rsync");
        assert_eq!(settings.rename.search_pattern, "(?i)^(.*)[.]png$");
        assert_eq!(settings.rename.replacement_pattern, "\\1.png");
        assert!(settings.rename.recursive);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ToolkitPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.backups_dir = Some(temp_dir.path().join("snapshots"));
        settings.rename.recursive = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backups_dir(&paths), temp_dir.path().join("snapshots"));
        assert!(!loaded.rename.recursive);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"watched_process": "obs64"}"#).unwrap();
        assert_eq!(loaded.watched_process, "obs64");
        assert_eq!(loaded.transfer_program, "rsync");
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_resolved_dirs_fall_back_to_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ToolkitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        assert_eq!(settings.backups_dir(&paths), paths.default_backups_dir());
        assert_eq!(settings.source_dir(&paths), paths.default_source_dir());
    }

    #[test]
    fn test_invalid_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ToolkitPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ToolkitError::Config(_)));
    }
}
