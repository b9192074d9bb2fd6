//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup and rename layers.

pub mod backup;
pub mod rename;

pub use backup::{handle_backup_command, BackupCommands, SortColumn};
pub use rename::{handle_rename_command, RenameArgs, RenameCommands};
