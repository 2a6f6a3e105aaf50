//! `sessions` subcommand handler.

use anyhow::Result;
use chrono::Local;
use mpv_recall::media::probe::FileMetadata;
use mpv_recall::{Config, SessionStore};
use std::path::Path;

use super::basename;

/// List saved sessions, most recently updated first.
///
/// `--probe` adds best-effort file metadata (size, duration, mtime) for each
/// session's last played file.
pub fn handle(probe: bool) -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::new(super::store_path(&config)?);

    let sessions = store.load_all();
    if sessions.is_empty() {
        println!("No saved sessions.");
        return Ok(());
    }

    let mut entries: Vec<_> = sessions.into_values().collect();
    entries.sort_by(|a, b| b.last_played_timestamp.cmp(&a.last_played_timestamp));

    for session in entries {
        let kind = if session.is_folder { "folder" } else { "file" };
        let updated = session
            .last_played_timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");

        println!("{}  [{}]", session.original_path, kind);
        println!(
            "    last played  {} at {}",
            basename(&session.last_played_file),
            session.position_hms()
        );
        println!("    updated      {}", updated);
        if !Path::new(&session.original_path).exists() {
            println!("    missing on disk - resume will offer deletion");
        }
        if probe {
            let meta = FileMetadata::collect(
                Path::new(&session.last_played_file),
                &config.media.probe_command,
            );
            if !meta.size.is_empty() {
                println!(
                    "    file         {}, {} long, modified {}",
                    meta.size, meta.duration, meta.modified
                );
            }
        }
        println!();
    }

    Ok(())
}
