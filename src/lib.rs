//! obs-toolkit - maintenance utilities for an OBS Studio installation
//!
//! This library provides named snapshots of the OBS configuration folder,
//! a regex bulk file renamer with live preview, and the slideshow hotkey
//! controller that runs inside the OBS host.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `process`: Detection of a running OBS process
//! - `backup`: Snapshot create/list/restore/delete on top of rsync
//! - `rename`: Regex bulk rename (enumerate, preview, apply)
//! - `slideshow`: Slideshow hotkeys over an abstract host facade
//! - `audit`: Journal of operations that changed files
//! - `cli`: Command handlers for the `obs-tool` binary
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use obs_toolkit::backup::BackupStore;
//! use obs_toolkit::config::{paths::ToolkitPaths, settings::Settings};
//!
//! let paths = ToolkitPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = BackupStore::new(settings.backups_dir(&paths), settings.source_dir(&paths))?;
//! store.create_backup("before-upgrade", None)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod process;
pub mod rename;
pub mod slideshow;

pub use error::{ToolkitError, ToolkitResult};
