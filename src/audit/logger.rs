//! Journal file access
//!
//! The journal is a JSON-lines file next to the settings. Writers only ever
//! append; readers skip blank lines and stop at the first line that does not
//! parse, reporting its line number.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{ToolkitError, ToolkitResult};

use super::entry::AuditEntry;

/// Appends to and reads back the operation journal
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Record one operation, creating the journal (and its folder) on first use
    pub fn log(&self, entry: &AuditEntry) -> ToolkitResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| ToolkitError::Json(format!("Failed to encode journal entry: {}", e)))?;

        let mut journal = self.open_for_append()?;
        writeln!(journal, "{}", line)
            .and_then(|_| journal.flush())
            .map_err(|e| {
                ToolkitError::Io(format!(
                    "Failed to append to {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// Every recorded operation, oldest first; a missing journal is empty
    pub fn read_all(&self) -> ToolkitResult<Vec<AuditEntry>> {
        let journal = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ToolkitError::Io(format!(
                    "Failed to open {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        BufReader::new(journal)
            .lines()
            .enumerate()
            .filter_map(|(index, line)| match line {
                Ok(text) if text.trim().is_empty() => None,
                other => Some((index + 1, other)),
            })
            .map(|(line_no, line)| {
                let text = line.map_err(|e| {
                    ToolkitError::Io(format!("Failed to read journal line {}: {}", line_no, e))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    ToolkitError::Json(format!("Malformed journal line {}: {}", line_no, e))
                })
            })
            .collect()
    }

    /// The last `count` operations, oldest first
    pub fn read_recent(&self, count: usize) -> ToolkitResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    fn open_for_append(&self) -> ToolkitResult<File> {
        if let Some(folder) = self.log_path.parent() {
            fs::create_dir_all(folder).map_err(|e| {
                ToolkitError::Io(format!("Failed to create {}: {}", folder.display(), e))
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                ToolkitError::Io(format!("Failed to open {}: {}", self.log_path.display(), e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{Operation, Outcome};
    use tempfile::TempDir;

    fn journal_in(temp_dir: &TempDir) -> AuditLogger {
        AuditLogger::new(temp_dir.path().join("toolkit").join("audit.log"))
    }

    #[test]
    fn test_log_creates_folder_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let journal = journal_in(&temp_dir);

        journal
            .log(&AuditEntry::success(Operation::BackupCreate, "nightly", None))
            .unwrap();

        let entries = journal.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::BackupCreate);
        assert_eq!(entries[0].outcome, Outcome::Success);
    }

    #[test]
    fn test_read_recent_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let journal = journal_in(&temp_dir);

        for i in 0..10 {
            let entry = AuditEntry::success(Operation::BackupDelete, format!("snap-{}", i), None);
            journal.log(&entry).unwrap();
        }

        let recent = journal.read_recent(3).unwrap();
        let targets: Vec<_> = recent.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["snap-7", "snap-8", "snap-9"]);
        assert_eq!(journal.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_missing_journal_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(journal_in(&temp_dir).read_all().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped_and_bad_line_reported() {
        let temp_dir = TempDir::new().unwrap();
        let journal = journal_in(&temp_dir);
        journal
            .log(&AuditEntry::failure(Operation::Rename, "/tmp/pics", "2 failed"))
            .unwrap();

        let mut raw = fs::OpenOptions::new().append(true).open(journal.path()).unwrap();
        writeln!(raw).unwrap();
        let reopened = AuditLogger::new(journal.path());
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].detail.as_deref(), Some("2 failed"));

        writeln!(raw, "not json").unwrap();
        let err = reopened.read_all().unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
