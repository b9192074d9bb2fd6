//! Bulk rename engine
//!
//! Renames are computed as a preview first: every candidate path relative to
//! the chosen folder is run through a regex substitution, and only rows whose
//! result differs from the original are moved when the preview is applied.
//! Failures are kept per row so one bad rename never stops the batch.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{ToolkitError, ToolkitResult};

use super::template::ReplacementTemplate;

/// Largest number of candidates a single folder may produce
pub const MAX_CANDIDATES: usize = 3000;

/// Result column of a preview row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The proposed new relative path
    Path(String),
    /// Why no path could be produced or the rename failed
    Error(String),
}

/// One candidate file and what it would be renamed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRow {
    /// Current path relative to the root folder
    pub original: String,
    /// Proposed path, or an error message
    pub proposed: RowOutcome,
}

impl RenameRow {
    /// Whether applying this row would move a file
    pub fn is_change(&self) -> bool {
        matches!(&self.proposed, RowOutcome::Path(path) if *path != self.original)
    }

    /// Text shown in the "new path" column
    pub fn proposed_text(&self) -> &str {
        match &self.proposed {
            RowOutcome::Path(path) => path,
            RowOutcome::Error(message) => message,
        }
    }
}

/// Counts from one apply pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Files moved
    pub renamed: usize,
    /// Rows whose proposed path equals the original
    pub unchanged: usize,
    /// Rows that failed now or already carried an error
    pub failed: usize,
}

/// Compile a search pattern, reporting failure as a `Pattern` error
pub fn compile_pattern(search_pattern: &str) -> ToolkitResult<Regex> {
    Regex::new(search_pattern).map_err(|e| ToolkitError::Pattern(e.to_string()))
}

/// List the files under `root` as relative, `/`-separated paths
///
/// Without `recursive` only regular files directly inside `root` are listed.
/// An empty `root` yields no candidates. More than [`MAX_CANDIDATES`] files
/// is an error rather than a truncated list.
pub fn enumerate_candidates(root: &Path, recursive: bool) -> ToolkitResult<Vec<String>> {
    collect_candidates(root, recursive, MAX_CANDIDATES)
}

fn collect_candidates(root: &Path, recursive: bool, limit: usize) -> ToolkitResult<Vec<String>> {
    if root.as_os_str().is_empty() {
        return Ok(Vec::new());
    }
    if !root.is_dir() {
        return Err(ToolkitError::NotFound {
            entity_type: "Folder",
            identifier: root.display().to_string(),
        });
    }

    let mut candidates = Vec::new();
    let mut push = |path: &Path| -> ToolkitResult<()> {
        candidates.push(relative_path(root, path));
        if candidates.len() > limit {
            return Err(ToolkitError::TooManyFiles { limit, recursive });
        }
        Ok(())
    };

    if recursive {
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.path().is_file() {
                push(entry.path())?;
            }
        }
    } else {
        for entry in fs::read_dir(root)
            .map_err(|e| ToolkitError::Io(format!("Failed to read {}: {}", root.display(), e)))?
        {
            let entry = entry.map_err(|e| {
                ToolkitError::Io(format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.is_file() {
                push(&path)?;
            }
        }
    }

    debug!("Found {} candidate(s) under {}", candidates.len(), root.display());
    Ok(candidates)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compute the proposed path for every candidate
///
/// A replacement template that cannot be used with `regex` turns every row
/// into an error row instead of failing the preview.
pub fn preview(candidates: &[String], regex: &Regex, replacement_pattern: &str) -> Vec<RenameRow> {
    let template = ReplacementTemplate::parse(replacement_pattern, regex);

    candidates
        .iter()
        .map(|original| {
            let proposed = match &template {
                Ok(template) => RowOutcome::Path(template.replace_all(regex, original)),
                Err(e) => RowOutcome::Error(e.to_string()),
            };
            RenameRow {
                original: original.clone(),
                proposed,
            }
        })
        .collect()
}

/// Perform the renames described by `rows`
///
/// A successful row has its `original` updated to the new path, so applying
/// the same rows again moves nothing. A failed row has its `proposed` column
/// replaced by the error message. Error rows are skipped.
pub fn apply(root: &Path, rows: &mut [RenameRow]) -> ApplyReport {
    let mut report = ApplyReport::default();

    for row in rows.iter_mut() {
        let destination = match &row.proposed {
            RowOutcome::Error(_) => {
                report.failed += 1;
                continue;
            }
            RowOutcome::Path(path) if *path == row.original => {
                report.unchanged += 1;
                continue;
            }
            RowOutcome::Path(path) => path.clone(),
        };

        match rename_one(root, &row.original, &destination) {
            Ok(()) => {
                debug!("Renamed {} -> {}", row.original, destination);
                row.original = destination;
                report.renamed += 1;
            }
            Err(e) => {
                warn!("Failed to rename {}: {}", row.original, e);
                row.proposed = RowOutcome::Error(e.to_string());
                report.failed += 1;
            }
        }
    }

    info!(
        "Rename pass: {} renamed, {} unchanged, {} failed",
        report.renamed, report.unchanged, report.failed
    );
    report
}

fn rename_one(root: &Path, original: &str, destination: &str) -> ToolkitResult<()> {
    let target = Path::new(destination);
    if target.is_absolute() || target.components().any(|c| c == Component::ParentDir) {
        return Err(ToolkitError::Validation(format!(
            "'{}' would leave the selected folder",
            destination
        )));
    }

    let source_path = root.join(original);
    let destination_path: PathBuf = root.join(target);

    if let Some(parent) = destination_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(&source_path, &destination_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
    }

    fn sorted(mut items: Vec<String>) -> Vec<String> {
        items.sort();
        items
    }

    #[test]
    fn test_compile_pattern_error_is_data() {
        let err = compile_pattern("(unbalanced").unwrap_err();
        assert!(matches!(err, ToolkitError::Pattern(_)));
        assert!(compile_pattern("(?i)^(.*)[.]png$").is_ok());
    }

    #[test]
    fn test_enumerate_flat_lists_only_top_level_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.png");
        touch(temp.path(), "b.txt");
        touch(temp.path(), "nested/c.png");

        let candidates = enumerate_candidates(temp.path(), false).unwrap();
        assert_eq!(sorted(candidates), vec!["a.png", "b.txt"]);
    }

    #[test]
    fn test_enumerate_recursive_uses_relative_paths() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.png");
        touch(temp.path(), "nested/c.png");
        touch(temp.path(), "nested/deeper/d.PNG");

        let candidates = enumerate_candidates(temp.path(), true).unwrap();
        assert_eq!(
            sorted(candidates),
            vec!["a.png", "nested/c.png", "nested/deeper/d.PNG"]
        );
    }

    #[test]
    fn test_enumerate_empty_root() {
        assert!(enumerate_candidates(Path::new(""), true).unwrap().is_empty());
    }

    #[test]
    fn test_enumerate_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = enumerate_candidates(&temp.path().join("missing"), false).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_enumerate_bound() {
        let temp = TempDir::new().unwrap();
        for i in 0..MAX_CANDIDATES {
            fs::write(temp.path().join(format!("f{i:04}.png")), "").unwrap();
        }

        let candidates = enumerate_candidates(temp.path(), true).unwrap();
        assert_eq!(candidates.len(), MAX_CANDIDATES);

        fs::write(temp.path().join("one-too-many.png"), "").unwrap();
        match enumerate_candidates(temp.path(), true).unwrap_err() {
            ToolkitError::TooManyFiles { limit, recursive } => {
                assert_eq!(limit, MAX_CANDIDATES);
                assert!(recursive);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bound_message_depends_on_recursion() {
        let temp = TempDir::new().unwrap();
        for i in 0..3 {
            touch(temp.path(), &format!("f{i}.png"));
        }

        let flat = collect_candidates(temp.path(), false, 2).unwrap_err();
        assert!(flat.to_string().contains("folder with fewer files"));

        let deep = collect_candidates(temp.path(), true, 2).unwrap_err();
        assert!(deep.to_string().contains("Include sub-folders"));
    }

    #[test]
    fn test_preview_case_fix() {
        let regex = compile_pattern("(?i)^(.*)[.]png$").unwrap();
        let candidates = vec!["Photo.PNG".to_string(), "notes.txt".to_string()];

        let rows = preview(&candidates, &regex, "\\1.png");

        assert_eq!(rows[0].proposed, RowOutcome::Path("Photo.png".into()));
        assert!(rows[0].is_change());
        assert_eq!(rows[1].proposed, RowOutcome::Path("notes.txt".into()));
        assert!(!rows[1].is_change());
    }

    #[test]
    fn test_preview_bad_reference_is_per_row_error() {
        let regex = compile_pattern("^(.*)$").unwrap();
        let candidates = vec!["a.png".to_string(), "b.png".to_string()];

        let rows = preview(&candidates, &regex, "\\2");

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(matches!(row.proposed, RowOutcome::Error(_)));
            assert!(row.proposed_text().contains("invalid group reference 2"));
        }
    }

    #[test]
    fn test_apply_moves_into_new_folders() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "shot-01.png");
        touch(temp.path(), "readme.txt");

        let regex = compile_pattern("^shot-(\\d+)[.]png$").unwrap();
        let candidates = enumerate_candidates(temp.path(), true).unwrap();
        let mut rows = preview(&candidates, &regex, "shots/\\1.png");

        let report = apply(temp.path(), &mut rows);

        assert_eq!(report.renamed, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.failed, 0);
        assert!(temp.path().join("shots/01.png").is_file());
        assert!(!temp.path().join("shot-01.png").exists());
        assert!(rows.iter().any(|row| row.original == "shots/01.png"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Photo.PNG");
        touch(temp.path(), "Other.PNG");

        let regex = compile_pattern("(?i)^(.*)[.]png$").unwrap();
        let candidates = enumerate_candidates(temp.path(), false).unwrap();
        let mut rows = preview(&candidates, &regex, "\\1.png");

        let first = apply(temp.path(), &mut rows);
        assert_eq!(first.renamed, 2);

        let second = apply(temp.path(), &mut rows);
        assert_eq!(second.renamed, 0);
        assert_eq!(second.unchanged, 2);
        assert!(temp.path().join("Photo.png").is_file());
    }

    #[test]
    fn test_apply_failure_does_not_stop_batch() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "good.png");

        let mut rows = vec![
            RenameRow {
                original: "vanished.png".into(),
                proposed: RowOutcome::Path("renamed.png".into()),
            },
            RenameRow {
                original: "good.png".into(),
                proposed: RowOutcome::Path("better.png".into()),
            },
            RenameRow {
                original: "bad.png".into(),
                proposed: RowOutcome::Error("invalid group reference".into()),
            },
        ];

        let report = apply(temp.path(), &mut rows);

        assert_eq!(report.renamed, 1);
        assert_eq!(report.failed, 2);
        assert!(matches!(rows[0].proposed, RowOutcome::Error(_)));
        assert_eq!(rows[0].original, "vanished.png");
        assert_eq!(rows[1].original, "better.png");
        assert!(temp.path().join("better.png").is_file());
    }

    #[test]
    fn test_apply_refuses_to_leave_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        touch(&root, "a.png");

        let mut rows = vec![RenameRow {
            original: "a.png".into(),
            proposed: RowOutcome::Path("../a.png".into()),
        }];

        let report = apply(&root, &mut rows);
        assert_eq!(report.failed, 1);
        assert!(root.join("a.png").is_file());
        assert!(!temp.path().join("a.png").exists());
    }
}
