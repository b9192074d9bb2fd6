//! Snapshot store for obs-toolkit
//!
//! A snapshot is a directory under the backups root holding a mirrored copy
//! of the watched folder. The directory listing is the only index.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::error::{ToolkitError, ToolkitResult};

use super::transfer::{Rsync, TransferTool};

/// Caller-supplied predicate consulted before overwriting an existing snapshot
///
/// Receives the snapshot name and its destination path; returning `false`
/// vetoes the backup.
pub type CollisionCallback<'a> = &'a dyn Fn(&str, &Path) -> bool;

/// Metadata about a snapshot
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Snapshot name (its directory name)
    pub name: String,
    /// Full path to the snapshot directory
    pub path: PathBuf,
    /// Directory creation time, or modification time where unavailable
    pub created_at: DateTime<Utc>,
}

/// Column a snapshot listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Date,
}

impl SortKey {
    /// Direction used the first time a column is selected
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Name => SortDirection::Ascending,
            SortKey::Date => SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Order a snapshot listing for display
pub fn sort_backups(backups: &mut [BackupInfo], key: SortKey, direction: SortDirection) {
    backups.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Date => a.created_at.cmp(&b.created_at),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Result of deleting several snapshots
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Names that were removed
    pub deleted: Vec<String>,
    /// Names that could not be removed, with the reason
    pub failed: Vec<(String, ToolkitError)>,
}

impl DeleteReport {
    pub fn all_deleted(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Reject names that are not a single plain directory name
pub fn validate_backup_name(name: &str) -> ToolkitResult<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("reserved name")
    } else if name.contains('/') || name.contains('\\') {
        Some("contains a path separator")
    } else if name.contains('\0') {
        Some("contains a NUL character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ToolkitError::InvalidBackupName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Creates, lists, restores and deletes snapshots of one source folder
pub struct BackupStore<T: TransferTool = Rsync> {
    backups_root: PathBuf,
    source_root: PathBuf,
    source_leaf_name: OsString,
    transfer: T,
}

impl BackupStore<Rsync> {
    /// Create a store that mirrors with the default `rsync`
    pub fn new(backups_root: impl AsRef<Path>, source_root: impl AsRef<Path>) -> ToolkitResult<Self> {
        Self::with_transfer(backups_root, source_root, Rsync::default())
    }
}

impl<T: TransferTool> BackupStore<T> {
    /// Create a store with a specific transfer tool
    ///
    /// The backups root is created (with parents) if missing.
    pub fn with_transfer(
        backups_root: impl AsRef<Path>,
        source_root: impl AsRef<Path>,
        transfer: T,
    ) -> ToolkitResult<Self> {
        let backups_root = normalize(backups_root.as_ref());
        let source_root = normalize(source_root.as_ref());

        let source_leaf_name = source_root
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| {
                ToolkitError::Config(format!(
                    "Source folder has no final component: {}",
                    source_root.display()
                ))
            })?;

        fs::create_dir_all(&backups_root).map_err(|e| {
            ToolkitError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        Ok(Self {
            backups_root,
            source_root,
            source_leaf_name,
            transfer,
        })
    }

    pub fn backups_root(&self) -> &Path {
        &self.backups_root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Final path component of the source folder
    pub fn source_leaf_name(&self) -> &std::ffi::OsStr {
        &self.source_leaf_name
    }

    /// Mirror the source folder into `backups_root/name`
    ///
    /// When the snapshot already exists, `on_collision` decides whether to
    /// overwrite it. An overwrite also drops files that have since left the
    /// source. Returns `Ok(false)` if the callback vetoed the backup.
    pub fn create_backup(
        &self,
        name: &str,
        on_collision: Option<CollisionCallback<'_>>,
    ) -> ToolkitResult<bool> {
        validate_backup_name(name)?;
        let destination = self.backups_root.join(name);

        if destination.is_dir() {
            if let Some(confirm) = on_collision {
                if !confirm(name, &destination) {
                    info!("Backup '{}' exists and overwrite was declined", name);
                    return Ok(false);
                }
            }
        }

        // No trailing separator: the folder itself lands inside the snapshot.
        self.transfer
            .mirror(self.source_root.as_os_str(), &destination)?
            .into_result()?;

        info!("Created backup '{}' at {}", name, destination.display());
        Ok(true)
    }

    /// List snapshot directories in filesystem order
    pub fn list_backups(&self) -> ToolkitResult<Vec<BackupInfo>> {
        if !self.backups_root.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backups_root).map_err(|e| {
            ToolkitError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                ToolkitError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let metadata = fs::metadata(&path).map_err(|e| {
                ToolkitError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let created = metadata.created().or_else(|_| metadata.modified())?;

            backups.push(BackupInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                created_at: DateTime::<Utc>::from(created),
            });
        }

        Ok(backups)
    }

    /// Look up a single snapshot by name
    pub fn get_backup(&self, name: &str) -> ToolkitResult<Option<BackupInfo>> {
        validate_backup_name(name)?;
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|backup| backup.name == name))
    }

    /// Mirror the contents of `backups_root/name/<source leaf>/` onto the source folder
    pub fn restore_backup(&self, name: &str) -> ToolkitResult<()> {
        validate_backup_name(name)?;
        let snapshot = self.backups_root.join(name);
        if !snapshot.is_dir() {
            return Err(ToolkitError::backup_not_found(name));
        }

        // Trailing separator: copy the folder's contents, not the folder.
        let mut source = snapshot.join(&self.source_leaf_name).into_os_string();
        source.push(MAIN_SEPARATOR_STR);

        self.transfer
            .mirror(&source, &self.source_root)?
            .into_result()?;

        info!("Restored backup '{}' into {}", name, self.source_root.display());
        Ok(())
    }

    /// Recursively remove one snapshot
    pub fn delete_backup(&self, name: &str) -> ToolkitResult<()> {
        validate_backup_name(name)?;
        let snapshot = self.backups_root.join(name);

        if !snapshot.is_dir() {
            return Err(ToolkitError::BackupDeletion {
                name: name.to_string(),
                reason: format!("no backup directory at {}", snapshot.display()),
            });
        }

        fs::remove_dir_all(&snapshot).map_err(|e| ToolkitError::BackupDeletion {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        info!("Deleted backup '{}'", name);
        Ok(())
    }

    /// Delete several snapshots, attempting each one independently
    pub fn delete_backups<S: AsRef<str>>(&self, names: &[S]) -> DeleteReport {
        let mut report = DeleteReport::default();

        for name in names {
            let name = name.as_ref();
            match self.delete_backup(name) {
                Ok(()) => report.deleted.push(name.to_string()),
                Err(e) => {
                    warn!("{}", e);
                    report.failed.push((name.to_string(), e));
                }
            }
        }

        report
    }
}

/// Drop trailing separators and `.` components so the leaf name is stable
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}
