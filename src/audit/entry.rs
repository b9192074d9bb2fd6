//! Audit entry data structures
//!
//! Defines the operations that are journaled and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutating operations that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A snapshot was created or overwritten
    BackupCreate,
    /// A snapshot was restored onto the source folder
    BackupRestore,
    /// A snapshot was deleted
    BackupDelete,
    /// A bulk rename pass was applied
    Rename,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::BackupCreate => write!(f, "BACKUP"),
            Operation::BackupRestore => write!(f, "RESTORE"),
            Operation::BackupDelete => write!(f, "DELETE"),
            Operation::Rename => write!(f, "RENAME"),
        }
    }
}

/// Whether the journaled operation succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation finished (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Snapshot name or folder the operation acted on
    pub target: String,

    pub outcome: Outcome,

    /// Free-form detail, e.g. the error message or rename counts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Entry for an operation that completed
    pub fn success(operation: Operation, target: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            outcome: Outcome::Success,
            detail,
        }
    }

    /// Entry for an operation that failed with `error`
    pub fn failure(operation: Operation, target: impl Into<String>, error: impl ToString) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            outcome: Outcome::Failure,
            detail: Some(error.to_string()),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.target
        );

        if self.outcome == Outcome::Failure {
            output.push_str(" FAILED");
        }

        if let Some(detail) = &self.detail {
            output.push_str(&format!("\n  {}", detail));
        }

        output
    }
}
