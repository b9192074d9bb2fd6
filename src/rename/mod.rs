//! Regex bulk rename
//!
//! # Workflow
//!
//! 1. `enumerate_candidates` lists files under a folder (optionally recursive)
//! 2. `compile_pattern` + `preview` compute the new path for each file
//! 3. `apply` moves the files whose path changed
//!
//! `RenameSession` keeps these steps together the way an interactive front
//! end drives them: changing the folder or recursion re-lists files, changing
//! a pattern only recomputes the preview, and a pattern that does not compile
//! is recorded without discarding the current rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use obs_toolkit::rename::RenameSession;
//!
//! let mut session = RenameSession::new("/home/me/Pictures", true, "(?i)^(.*)[.]png$", "\\1.png");
//! session.refresh()?;
//! for row in session.rows() {
//!     println!("{} -> {}", row.original, row.proposed_text());
//! }
//! let report = session.apply();
//! ```

mod engine;
mod template;

use std::path::{Path, PathBuf};

pub use engine::{
    apply, compile_pattern, enumerate_candidates, preview, ApplyReport, RenameRow, RowOutcome,
    MAX_CANDIDATES,
};
pub use template::ReplacementTemplate;

use crate::error::ToolkitResult;

/// Interactive state of one rename folder
#[derive(Debug, Clone)]
pub struct RenameSession {
    root: PathBuf,
    recursive: bool,
    search_pattern: String,
    replacement_pattern: String,
    rows: Vec<RenameRow>,
    pattern_error: Option<String>,
}

impl RenameSession {
    pub fn new(
        root: impl Into<PathBuf>,
        recursive: bool,
        search_pattern: impl Into<String>,
        replacement_pattern: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            recursive,
            search_pattern: search_pattern.into(),
            replacement_pattern: replacement_pattern.into(),
            rows: Vec::new(),
            pattern_error: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn rows(&self) -> &[RenameRow] {
        &self.rows
    }

    /// Message from the last search pattern that failed to compile
    pub fn pattern_error(&self) -> Option<&str> {
        self.pattern_error.as_deref()
    }

    /// Change folder and re-list its files
    pub fn set_root(&mut self, root: impl Into<PathBuf>) -> ToolkitResult<()> {
        self.root = root.into();
        self.refresh()
    }

    /// Toggle sub-folders and re-list files
    pub fn set_recursive(&mut self, recursive: bool) -> ToolkitResult<()> {
        self.recursive = recursive;
        self.refresh()
    }

    /// Change the search pattern and recompute the preview
    pub fn set_search_pattern(&mut self, search_pattern: impl Into<String>) {
        self.search_pattern = search_pattern.into();
        self.update_preview();
    }

    /// Change the replacement pattern and recompute the preview
    pub fn set_replacement_pattern(&mut self, replacement_pattern: impl Into<String>) {
        self.replacement_pattern = replacement_pattern.into();
        self.update_preview();
    }

    /// Re-list files under the folder and recompute the preview
    ///
    /// On failure (too many files, unreadable folder) the previous rows are kept.
    pub fn refresh(&mut self) -> ToolkitResult<()> {
        let candidates = enumerate_candidates(&self.root, self.recursive)?;
        self.rows = candidates
            .into_iter()
            .map(|original| RenameRow {
                proposed: RowOutcome::Path(original.clone()),
                original,
            })
            .collect();
        self.update_preview();
        Ok(())
    }

    fn update_preview(&mut self) {
        match compile_pattern(&self.search_pattern) {
            Ok(regex) => {
                self.pattern_error = None;
                let originals: Vec<String> =
                    self.rows.iter().map(|row| row.original.clone()).collect();
                self.rows = preview(&originals, &regex, &self.replacement_pattern);
            }
            Err(e) => self.pattern_error = Some(e.to_string()),
        }
    }

    /// Apply the current preview
    pub fn apply(&mut self) -> ApplyReport {
        apply(&self.root, &mut self.rows)
    }
}
