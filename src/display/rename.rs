//! Rename preview formatting

use crate::rename::{ApplyReport, RenameRow, RowOutcome};

/// Format preview rows as two columns, marking rows that change or failed
pub fn format_rename_preview(rows: &[RenameRow]) -> String {
    if rows.is_empty() {
        return "No files found.".to_string();
    }

    let width = rows
        .iter()
        .map(|row| row.original.chars().count())
        .max()
        .unwrap_or(13)
        .max(13);

    let mut output = String::new();
    output.push_str(&format!("  {:<width$}  {}\n", "Original path", "New path", width = width));
    output.push_str(&format!("  {:-<width$}  {:-<8}\n", "", "", width = width));

    for row in rows {
        let marker = match &row.proposed {
            RowOutcome::Error(_) => '!',
            RowOutcome::Path(_) if row.is_change() => '*',
            RowOutcome::Path(_) => ' ',
        };
        output.push_str(&format!(
            "{} {:<width$}  {}\n",
            marker,
            row.original,
            row.proposed_text(),
            width = width
        ));
    }

    let changes = rows.iter().filter(|row| row.is_change()).count();
    let errors = rows
        .iter()
        .filter(|row| matches!(row.proposed, RowOutcome::Error(_)))
        .count();
    output.push_str(&format!(
        "\n{} file(s), {} to rename, {} error(s)",
        rows.len(),
        changes,
        errors
    ));
    output
}

/// One-line summary of an apply pass
pub fn format_apply_report(report: &ApplyReport) -> String {
    format!(
        "Renamed {} file(s), {} unchanged, {} failed",
        report.renamed, report.unchanged, report.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_markers() {
        let rows = vec![
            RenameRow {
                original: "Photo.PNG".into(),
                proposed: RowOutcome::Path("Photo.png".into()),
            },
            RenameRow {
                original: "notes.txt".into(),
                proposed: RowOutcome::Path("notes.txt".into()),
            },
            RenameRow {
                original: "bad.png".into(),
                proposed: RowOutcome::Error("Regex error: invalid group reference 2".into()),
            },
        ];

        let output = format_rename_preview(&rows);
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[2].starts_with("* Photo.PNG"));
        assert!(lines[2].ends_with("Photo.png"));
        assert!(lines[3].starts_with("  notes.txt"));
        assert!(lines[4].starts_with("! bad.png"));
        assert!(output.ends_with("3 file(s), 1 to rename, 1 error(s)"));
    }

    #[test]
    fn test_empty_preview() {
        assert_eq!(format_rename_preview(&[]), "No files found.");
    }

    #[test]
    fn test_apply_report() {
        let report = ApplyReport {
            renamed: 2,
            unchanged: 5,
            failed: 1,
        };
        assert_eq!(
            format_apply_report(&report),
            "Renamed 2 file(s), 5 unchanged, 1 failed"
        );
    }
}
