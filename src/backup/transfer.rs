//! Mirror-copy transfer tool
//!
//! Snapshots are copied by an external synchronisation program. The store
//! decides *what* to copy (and whether the source carries a trailing
//! separator); a `TransferTool` only runs the copy and reports how it ended.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{ToolkitError, ToolkitResult};

/// Arguments passed to rsync before the two positional paths
///
/// `--delete` makes the copy a mirror: entries only present at the
/// destination are removed, so an overwritten snapshot (or a restored
/// folder) holds exactly what the source held.
pub const RSYNC_ARGS: &[&str] = &["-avP", "--delete"];

/// Outcome of a finished transfer
#[derive(Debug, Clone, Default)]
pub struct TransferOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl TransferOutput {
    /// A transfer that exited with status 0
    pub fn succeeded() -> Self {
        Self {
            exit_code: Some(0),
            ..Self::default()
        }
    }

    /// Whether the tool exited with status 0
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Convert a non-zero exit into a `BackupTransfer` error
    pub fn into_result(self) -> ToolkitResult<()> {
        if self.is_success() {
            return Ok(());
        }

        Err(ToolkitError::BackupTransfer {
            exit_code: self.exit_code,
            output: format!("{}\n\n{}", self.stdout, self.stderr),
        })
    }
}

/// Runs one blocking mirror copy from `source` to `destination`
///
/// `source` is passed through untouched so a trailing separator survives.
pub trait TransferTool {
    fn mirror(&self, source: &OsStr, destination: &Path) -> ToolkitResult<TransferOutput>;
}

/// rsync in archive, verbose, partial-progress, delete-extraneous mode
#[derive(Debug, Clone)]
pub struct Rsync {
    program: String,
}

impl Rsync {
    /// Use a specific rsync binary
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Rsync {
    fn default() -> Self {
        Self::new("rsync")
    }
}

impl TransferTool for Rsync {
    fn mirror(&self, source: &OsStr, destination: &Path) -> ToolkitResult<TransferOutput> {
        debug!(
            "Running {} {} {:?} {:?}",
            self.program,
            RSYNC_ARGS.join(" "),
            source,
            destination
        );

        let output = Command::new(&self.program)
            .args(RSYNC_ARGS)
            .arg(source)
            .arg(destination)
            .output()
            .map_err(|e| ToolkitError::Io(format!("Failed to launch {}: {}", self.program, e)))?;

        Ok(TransferOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
