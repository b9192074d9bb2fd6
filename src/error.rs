//! Custom error types for obs-toolkit
//!
//! This module defines the error hierarchy for the toolkit using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for obs-toolkit operations
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backup name that cannot be used as a single directory name
    #[error("Invalid backup name '{name}': {reason}")]
    InvalidBackupName { name: String, reason: &'static str },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The mirror tool exited unsuccessfully
    #[error("{}", format_transfer_error(.exit_code, .output))]
    BackupTransfer {
        exit_code: Option<i32>,
        output: String,
    },

    /// A snapshot directory could not be removed
    #[error("Failed to delete backup '{name}': {reason}")]
    BackupDeletion { name: String, reason: String },

    /// Regex compilation or substitution errors
    #[error("Regex error: {0}")]
    Pattern(String),

    /// Candidate enumeration exceeded its bound
    #[error("{}", format_too_many_files(.limit, .recursive))]
    TooManyFiles { limit: usize, recursive: bool },
}

fn format_transfer_error(exit_code: &Option<i32>, output: &str) -> String {
    match *exit_code {
        Some(code) => format!("rsync exit code: {}\n\n{}", code, output),
        None => format!("rsync terminated by signal\n\n{}", output),
    }
}

fn format_too_many_files(limit: &usize, recursive: &bool) -> String {
    let hint = if *recursive {
        "Try turning off 'Include sub-folders' to select fewer files."
    } else {
        "Try selecting a folder with fewer files."
    };
    format!("Too many files found (more than {}).\n\n{}", limit, hint)
}

impl ToolkitError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidBackupName { .. })
    }
}

impl From<std::io::Error> for ToolkitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ToolkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<regex::Error> for ToolkitError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}

/// Result type alias for obs-toolkit operations
pub type ToolkitResult<T> = Result<T, ToolkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolkitError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ToolkitError::backup_not_found("before-upgrade");
        assert_eq!(err.to_string(), "Backup not found: before-upgrade");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transfer_error_carries_output() {
        let err = ToolkitError::BackupTransfer {
            exit_code: Some(23),
            output: "some files could not be transferred".into(),
        };
        assert_eq!(
            err.to_string(),
            "rsync exit code: 23\n\nsome files could not be transferred"
        );
    }

    #[test]
    fn test_too_many_files_hints() {
        let recursive = ToolkitError::TooManyFiles {
            limit: 3000,
            recursive: true,
        };
        assert!(recursive.to_string().contains("more than 3000"));
        assert!(recursive.to_string().contains("Include sub-folders"));

        let flat = ToolkitError::TooManyFiles {
            limit: 3000,
            recursive: false,
        };
        assert!(flat.to_string().contains("folder with fewer files"));
    }

    #[test]
    fn test_invalid_name_is_validation() {
        let err = ToolkitError::InvalidBackupName {
            name: "..".into(),
            reason: "reserved name",
        };
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolkitError = io_err.into();
        assert!(matches!(err, ToolkitError::Io(_)));
    }
}
