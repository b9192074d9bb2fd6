//! Rename CLI commands
//!
//! Preview and apply a regex bulk rename over a folder.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::paths::ToolkitPaths;
use crate::config::settings::Settings;
use crate::display::{format_apply_report, format_rename_preview};
use crate::error::ToolkitResult;
use crate::rename::{compile_pattern, RenameSession};

use super::backup::log_entry;

/// Arguments shared by preview and apply
#[derive(Args)]
pub struct RenameArgs {
    /// Folder whose files are renamed
    pub folder: PathBuf,

    /// Search regex (defaults to the configured pattern)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Replacement template, `\1` or `\g<name>` refer to groups
    #[arg(short, long)]
    pub replacement: Option<String>,

    /// Only look at files directly inside the folder
    #[arg(long)]
    pub no_recursive: bool,
}

/// Rename subcommands
#[derive(Subcommand)]
pub enum RenameCommands {
    /// Show the new name each file would get
    Preview(RenameArgs),

    /// Rename the files whose name changes
    Apply {
        #[command(flatten)]
        args: RenameArgs,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a rename command
pub fn handle_rename_command(
    paths: &ToolkitPaths,
    settings: &Settings,
    cmd: RenameCommands,
) -> ToolkitResult<()> {
    match cmd {
        RenameCommands::Preview(args) => {
            let session = load_session(settings, args)?;
            println!("{}", format_rename_preview(session.rows()));
        }

        RenameCommands::Apply { args, force } => {
            let mut session = load_session(settings, args)?;
            let pending = session.rows().iter().filter(|row| row.is_change()).count();

            if pending == 0 {
                println!("Nothing to rename.");
                return Ok(());
            }

            if !force {
                println!("{}", format_rename_preview(session.rows()));
                println!();
                println!("To rename {} file(s), run again with --force flag.", pending);
                return Ok(());
            }

            let report = session.apply();
            let summary = format_apply_report(&report);
            let target = session.root().display().to_string();
            let entry = if report.failed == 0 {
                AuditEntry::success(Operation::Rename, target, Some(summary.clone()))
            } else {
                AuditEntry::failure(Operation::Rename, target, &summary)
            };
            log_entry(&AuditLogger::new(paths.audit_log()), entry);

            println!("{}", format_rename_preview(session.rows()));
            println!();
            println!("{}", summary);
        }
    }

    Ok(())
}

fn load_session(settings: &Settings, args: RenameArgs) -> ToolkitResult<RenameSession> {
    let defaults = &settings.rename;
    let recursive = defaults.recursive && !args.no_recursive;
    let search_pattern = args
        .pattern
        .unwrap_or_else(|| defaults.search_pattern.clone());
    compile_pattern(&search_pattern)?;

    let mut session = RenameSession::new(
        args.folder,
        recursive,
        search_pattern,
        args.replacement
            .unwrap_or_else(|| defaults.replacement_pattern.clone()),
    );
    session.refresh()?;
    Ok(session)
}
