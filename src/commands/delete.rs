//! `delete` subcommand handler.

use anyhow::Result;
use std::path::PathBuf;

use mpv_recall::Config;

use super::{build_orchestrator, prompt_confirmation};

/// Delete the session keyed by `path`. Idempotent.
pub fn handle(path: PathBuf, yes: bool) -> Result<()> {
    let config = Config::load()?;
    let orchestrator = build_orchestrator(&config)?;
    let key = path.to_string_lossy().into_owned();

    if !yes && !prompt_confirmation(&format!("Delete the saved session for '{}'?", key))? {
        println!("No changes made.");
        return Ok(());
    }

    if orchestrator.delete(&key)? {
        println!("Session deleted.");
    } else {
        println!("No saved session for '{}'. Nothing to do.", key);
    }

    Ok(())
}
