//! Path management for obs-toolkit
//!
//! ## Path Resolution Order
//!
//! 1. `OBS_TOOLKIT_DIR` environment variable (if set)
//! 2. The platform config directory joined with `obs-toolkit`
//!    (`~/.config/obs-toolkit` on Linux)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::ToolkitError;

/// Environment variable that overrides the toolkit's own config directory
pub const DIR_ENV_VAR: &str = "OBS_TOOLKIT_DIR";

/// Manages all paths used by obs-toolkit
#[derive(Debug, Clone)]
pub struct ToolkitPaths {
    /// Directory holding the toolkit's settings and audit log
    base_dir: PathBuf,
    /// User home directory, used for default backup locations
    home_dir: PathBuf,
    /// Platform config directory (`~/.config` on Linux)
    platform_config_dir: PathBuf,
}

impl ToolkitPaths {
    /// Resolve paths for the current user
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ToolkitError> {
        let dirs = BaseDirs::new()
            .ok_or_else(|| ToolkitError::Config("Could not determine home directory".into()))?;

        let platform_config_dir = dirs.config_dir().to_path_buf();
        let base_dir = match std::env::var(DIR_ENV_VAR) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => platform_config_dir.join("obs-toolkit"),
        };

        Ok(Self {
            base_dir,
            home_dir: dirs.home_dir().to_path_buf(),
            platform_config_dir,
        })
    }

    /// Create ToolkitPaths rooted entirely under one directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            home_dir: base_dir.join("home"),
            platform_config_dir: base_dir.join("config"),
            base_dir,
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Default snapshot root (`~/obs-backups`)
    pub fn default_backups_dir(&self) -> PathBuf {
        self.home_dir.join("obs-backups")
    }

    /// Default watched folder (`~/.config/obs-studio` on Linux)
    pub fn default_source_dir(&self) -> PathBuf {
        self.platform_config_dir.join("obs-studio")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ToolkitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ToolkitError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if obs-toolkit has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ToolkitPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_default_locations() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ToolkitPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.default_backups_dir(),
            temp_dir.path().join("home").join("obs-backups")
        );
        assert_eq!(
            paths.default_source_dir(),
            temp_dir.path().join("config").join("obs-studio")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("toolkit");
        let paths = ToolkitPaths::with_base_dir(base.clone());

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(base.is_dir());
    }
}
