//! Subcommand handlers.

pub mod config;
pub mod delete;
pub mod play;
pub mod resume;
pub mod sessions;

use anyhow::Result;
use mpv_recall::player::Launcher;
use mpv_recall::{Config, Orchestrator, SessionStore};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Resolve the session store location: config override, else the default.
pub(crate) fn store_path(config: &Config) -> Result<PathBuf> {
    match &config.store.path {
        Some(path) => Ok(path.clone()),
        None => SessionStore::default_path(),
    }
}

/// Wire up the orchestrator from config, honoring the store path override.
pub(crate) fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    Ok(Orchestrator::new(
        SessionStore::new(store_path(config)?),
        Launcher::new(config.player.command.clone()),
        config.media.extensions.clone(),
    ))
}

/// File name component of a path string, for compact display.
pub(crate) fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
pub(crate) fn prompt_confirmation(message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!("Non-interactive mode: use --yes to confirm automatically");
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
