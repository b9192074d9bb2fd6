//! Display formatting for terminal output
//!
//! Provides utilities for formatting snapshot listings and rename previews
//! for terminal display.

pub mod backup;
pub mod rename;

pub use backup::{format_backup_list, format_duration};
pub use rename::{format_apply_report, format_rename_preview};
