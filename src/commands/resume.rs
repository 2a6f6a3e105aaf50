//! `resume` subcommand handler.

use anyhow::{Context, Result};
use mpv_recall::{Config, Outcome, SessionError};
use std::path::PathBuf;

use super::{basename, build_orchestrator, prompt_confirmation};

/// Resume a saved session.
///
/// With no path argument, resumes the most recently updated session. When
/// the original selection has vanished, offers to delete the stale entry
/// (`--delete-stale` skips the prompt).
pub fn handle(path: Option<PathBuf>, delete_stale: bool) -> Result<()> {
    let config = Config::load()?;
    let orchestrator = build_orchestrator(&config)?;

    let key = match path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => orchestrator
            .store()
            .most_recent()
            .map(|session| session.original_path)
            .context("No saved sessions yet. Play something first with `mpv-recall play`.")?,
    };

    println!("Resuming {} (waiting for the player to close)...", key);

    match orchestrator.resume(&key) {
        Ok(outcome) => {
            if outcome.was_reset() {
                println!(
                    "The last played file is no longer in the folder; restarted from the beginning."
                );
            }
            match outcome {
                Outcome::Saved { session, .. } => {
                    println!(
                        "Playback stopped. New position saved: {} at {}.",
                        basename(&session.last_played_file),
                        session.position_hms()
                    );
                }
                Outcome::NothingToSave { .. } => {
                    println!("Playback finished. No new position was saved.");
                }
            }
            Ok(())
        }
        Err(SessionError::PathMissing { path }) => {
            println!("'{}' no longer exists. It may have been moved or deleted.", path);
            if delete_stale || prompt_confirmation("Delete this stale session?")? {
                orchestrator.delete(&key)?;
                println!("Stale session deleted.");
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
