//! CLI entry point.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mpv-recall",
    version,
    about = "Resume media playback exactly where you left off"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a file or folder and remember where you stopped
    Play {
        /// File or folder to play; opens a picker dialog when omitted
        path: Option<PathBuf>,
        /// Pick a folder instead of a file
        #[arg(long)]
        folder: bool,
    },
    /// Resume a saved session where it left off
    Resume {
        /// Session key (the originally selected path); most recent when omitted
        path: Option<PathBuf>,
        /// Delete the session without asking if its path no longer exists
        #[arg(long)]
        delete_stale: bool,
    },
    /// List saved sessions
    Sessions {
        /// Include best-effort file metadata (needs ffprobe)
        #[arg(long)]
        probe: bool,
    },
    /// Delete a saved session
    Delete {
        /// Session key (the originally selected path)
        path: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print config and store file locations
    Path,
    /// Open the config file in $EDITOR
    Edit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Play { path, folder } => commands::play::handle(path, folder),
        Command::Resume { path, delete_stale } => commands::resume::handle(path, delete_stale),
        Command::Sessions { probe } => commands::sessions::handle(probe),
        Command::Delete { path, yes } => commands::delete::handle(path, yes),
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Path => commands::config::handle_path(),
            ConfigAction::Edit => commands::config::handle_edit(),
        },
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "mpv-recall",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
