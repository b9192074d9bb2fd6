//! Snapshot display formatting
//!
//! Formats snapshot listings for terminal output.

use chrono::{DateTime, Local, Utc};

use crate::backup::BackupInfo;

/// Format a list of snapshots as a table (Name, Date, Age)
pub fn format_backup_list(backups: &[BackupInfo], now: DateTime<Utc>) -> String {
    if backups.is_empty() {
        return "No backups found.\n\nCreate one with: obs-tool backup create <name>".to_string();
    }

    let name_width = backups
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<19}  {:>5}\n",
        "Name",
        "Date",
        "Age",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<19}  {:->5}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for backup in backups {
        output.push_str(&format!(
            "{:<name_width$}  {:<19}  {:>5}\n",
            backup.name,
            backup
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            format_duration(now.signed_duration_since(backup.created_at)),
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} backup(s)", backups.len()));
    output
}

/// Format a duration in human-readable form
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_list() {
        let output = format_backup_list(&[], Utc::now());
        assert!(output.starts_with("No backups found."));
    }

    #[test]
    fn test_list_rows() {
        let now = Utc::now();
        let backups = vec![
            BackupInfo {
                name: "before-upgrade".into(),
                path: PathBuf::from("/b/before-upgrade"),
                created_at: now - chrono::Duration::hours(3),
            },
            BackupInfo {
                name: "x".into(),
                path: PathBuf::from("/b/x"),
                created_at: now - chrono::Duration::days(2),
            },
        ];

        let output = format_backup_list(&backups, now);
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].starts_with("before-upgrade"));
        assert!(lines[2].ends_with("3h"));
        assert!(lines[3].starts_with("x "));
        assert!(lines[3].ends_with("2d"));
        assert!(output.ends_with("Total: 2 backup(s)"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(5)), "5s");
        assert_eq!(format_duration(chrono::Duration::minutes(5)), "5m");
        assert_eq!(format_duration(chrono::Duration::days(65)), "2mo");
        assert_eq!(format_duration(chrono::Duration::seconds(-3)), "0s");
    }
}
