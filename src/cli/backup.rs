//! Backup CLI commands
//!
//! Implements CLI commands for snapshot management.

use std::path::Path;

use clap::{Subcommand, ValueEnum};
use log::warn;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::backup::{sort_backups, BackupStore, Rsync, SortKey};
use crate::config::paths::ToolkitPaths;
use crate::config::settings::Settings;
use crate::display::format_backup_list;
use crate::error::ToolkitResult;
use crate::process::ProcessProbe;

/// Column used to order `backup list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Name,
    Date,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortKey::Name,
            SortColumn::Date => SortKey::Date,
        }
    }
}

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the OBS config folder under a name
    Create {
        /// Snapshot name (a single folder name)
        name: String,

        /// Overwrite an existing snapshot and ignore a running OBS
        #[arg(short, long)]
        force: bool,
    },

    /// List all snapshots
    List {
        /// Column to sort by
        #[arg(short, long, value_enum, default_value = "name")]
        sort: SortColumn,

        /// Reverse the column's default order
        #[arg(short, long)]
        reverse: bool,
    },

    /// Copy a snapshot back over the OBS config folder
    Restore {
        /// Snapshot name
        name: String,

        /// Restore even while OBS is running
        #[arg(short, long)]
        force: bool,
    },

    /// Delete one or more snapshots
    Delete {
        /// Snapshot names
        #[arg(required = true)]
        names: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &ToolkitPaths,
    settings: &Settings,
    probe: &dyn ProcessProbe,
    cmd: BackupCommands,
) -> ToolkitResult<()> {
    let store = BackupStore::with_transfer(
        settings.backups_dir(paths),
        settings.source_dir(paths),
        Rsync::new(settings.transfer_program.clone()),
    )?;
    let audit = AuditLogger::new(paths.audit_log());

    match cmd {
        BackupCommands::Create { name, force } => {
            if !confirm_not_running(probe, settings, force) {
                return Ok(());
            }

            let on_collision = |name: &str, destination: &Path| {
                if !force {
                    println!(
                        "Backup '{}' already exists at {}.",
                        name,
                        destination.display()
                    );
                    println!("To overwrite it, run again with --force flag:");
                    println!("  obs-tool backup create {} --force", name);
                }
                force
            };

            println!("Creating backup '{}'...", name);
            let result = store.create_backup(&name, Some(&on_collision));
            record(&audit, Operation::BackupCreate, &name, &result);

            if result? {
                println!("Created new backup: '{}'", name);
                println!("Location: {}", store.backups_root().join(&name).display());
            }
        }

        BackupCommands::List { sort, reverse } => {
            let mut backups = store.list_backups()?;
            let key = SortKey::from(sort);
            let direction = if reverse {
                key.default_direction().reversed()
            } else {
                key.default_direction()
            };
            sort_backups(&mut backups, key, direction);

            println!("Backups in {}", store.backups_root().display());
            println!();
            println!("{}", format_backup_list(&backups, chrono::Utc::now()));
        }

        BackupCommands::Restore { name, force } => {
            if !confirm_not_running(probe, settings, force) {
                return Ok(());
            }

            println!("Restoring backup '{}'...", name);
            let result = store.restore_backup(&name);
            record(&audit, Operation::BackupRestore, &name, &result);
            result?;

            println!("Backup '{}' has been restored", name);
        }

        BackupCommands::Delete { names, force } => {
            if !force {
                println!("This will permanently delete {} backup(s):", names.len());
                for name in &names {
                    println!("  {}", name);
                }
                println!();
                println!("To proceed, run again with --force flag.");
                return Ok(());
            }

            let report = store.delete_backups(&names);
            for name in &report.deleted {
                record(&audit, Operation::BackupDelete, name, &Ok(()));
                println!("Deleted backup: '{}'", name);
            }
            for (name, error) in &report.failed {
                log_entry(&audit, AuditEntry::failure(Operation::BackupDelete, name, error));
            }

            if !report.all_deleted() {
                println!();
                println!("Unable to delete the following backups:");
                for (name, error) in &report.failed {
                    println!("  {}: {}", name, error);
                }
            }
        }
    }

    Ok(())
}

/// Warn about a running OBS; true when it is safe (or forced) to continue
fn confirm_not_running(probe: &dyn ProcessProbe, settings: &Settings, force: bool) -> bool {
    if !probe.is_running(&settings.watched_process) {
        return true;
    }

    if force {
        println!(
            "Warning: {} is still running. Continuing because --force was given.",
            settings.watched_process
        );
        return true;
    }

    println!(
        "Warning: {} is still running. Its settings may be overwritten when it exits.",
        settings.watched_process
    );
    println!("Close it first, or run again with --force flag to continue anyway.");
    false
}

fn record<T>(audit: &AuditLogger, operation: Operation, target: &str, result: &ToolkitResult<T>) {
    let entry = match result {
        Ok(_) => AuditEntry::success(operation, target, None),
        Err(e) => AuditEntry::failure(operation, target, e),
    };
    log_entry(audit, entry);
}

pub(crate) fn log_entry(audit: &AuditLogger, entry: AuditEntry) {
    if let Err(e) = audit.log(&entry) {
        warn!("Could not write audit log: {}", e);
    }
}
