//! Configuration module for obs-toolkit
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ToolkitPaths;
pub use settings::{RenameDefaults, Settings};
