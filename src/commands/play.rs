//! `play` subcommand handler.

use anyhow::Result;
use mpv_recall::picker::{self, PickMode};
use mpv_recall::{Config, Outcome};
use std::path::PathBuf;

use super::{basename, build_orchestrator};

/// Play a new selection and save where playback stopped.
///
/// With no path argument, opens the native file picker (`--folder` switches
/// it to directory mode).
pub fn handle(path: Option<PathBuf>, folder: bool) -> Result<()> {
    let config = Config::load()?;

    let path = match path {
        Some(path) => path,
        None => {
            let mode = if folder {
                PickMode::Folder
            } else {
                PickMode::File
            };
            picker::pick(&config.picker.command, mode)?
        }
    };

    let orchestrator = build_orchestrator(&config)?;
    println!("Playing {} (waiting for the player to close)...", path.display());

    match orchestrator.play_new(&path)? {
        Outcome::Saved { session, .. } => {
            println!(
                "Playback stopped. Position saved for {} at {}.",
                basename(&session.last_played_file),
                session.position_hms()
            );
        }
        Outcome::NothingToSave { .. } => {
            println!("Playback finished. No position was saved.");
        }
    }

    Ok(())
}
