//! Snapshot backups of the OBS config folder
//!
//! # Architecture
//!
//! - `BackupStore`: creates, lists, restores and deletes named snapshots
//! - `TransferTool`: the mirror-copy seam, implemented by `Rsync`
//!
//! # Snapshot Layout
//!
//! A backup copies the source folder itself, so a snapshot named `n` of
//! `~/.config/obs-studio` lives at `<backups root>/n/obs-studio/...`. A
//! restore copies only the *contents* of that inner folder back onto the
//! source folder.
//!
//! # Example
//!
//! ```rust,ignore
//! use obs_toolkit::backup::BackupStore;
//!
//! let store = BackupStore::new("/home/me/obs-backups", "/home/me/.config/obs-studio")?;
//! let overwrite = |name: &str, _: &std::path::Path| name.starts_with("scratch");
//! store.create_backup("before-upgrade", Some(&overwrite))?;
//! store.restore_backup("before-upgrade")?;
//! ```

mod store;
mod transfer;

pub use store::{
    sort_backups, validate_backup_name, BackupInfo, BackupStore, CollisionCallback, DeleteReport,
    SortDirection, SortKey,
};
pub use transfer::{Rsync, TransferOutput, TransferTool, RSYNC_ARGS};
