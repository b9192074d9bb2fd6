use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use obs_toolkit::audit::AuditLogger;
use obs_toolkit::cli::{handle_backup_command, handle_rename_command};
use obs_toolkit::config::{paths::ToolkitPaths, settings::Settings};
use obs_toolkit::process::ProcessDetector;

#[derive(Parser)]
#[command(
    name = "obs-tool",
    version,
    about = "Maintenance utilities for OBS Studio",
    long_about = "obs-tool keeps named snapshots of the OBS Studio configuration \
                  folder and bulk-renames media files with a regular expression, \
                  showing a preview before anything is touched."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot management commands
    #[command(subcommand)]
    Backup(obs_toolkit::cli::BackupCommands),

    /// Regex bulk rename commands
    #[command(subcommand)]
    Rename(obs_toolkit::cli::RenameCommands),

    /// Show recent operations from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write the default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let paths = ToolkitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, &ProcessDetector::new(), cmd)?;
        }
        Some(Commands::Rename(cmd)) => {
            handle_rename_command(&paths, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;
            if entries.is_empty() {
                println!("No operations recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Already initialized: {}",
                    paths.settings_file().display()
                );
                return Ok(());
            }
            settings.save(&paths)?;
            println!("Initialized obs-tool at: {}", paths.base_dir().display());
            println!();
            println!("Edit {} to change:", paths.settings_file().display());
            println!("  backups_dir  (default {})", paths.default_backups_dir().display());
            println!("  source_dir   (default {})", paths.default_source_dir().display());
        }
        Some(Commands::Config) => {
            println!("obs-tool Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backups folder:  {}", settings.backups_dir(&paths).display());
            println!("  OBS folder:      {}", settings.source_dir(&paths).display());
            println!("  Watched process: {}", settings.watched_process);
            println!("  Transfer tool:   {}", settings.transfer_program);
            println!("  Rename pattern:  {}", settings.rename.search_pattern);
            println!("  Replacement:     {}", settings.rename.replacement_pattern);
            println!("  Sub-folders:     {}", settings.rename.recursive);
        }
        None => {
            println!("obs-tool - maintenance utilities for OBS Studio");
            println!();
            println!("Run 'obs-tool --help' for usage information.");
        }
    }

    Ok(())
}
