//! Persistent session store.
//!
//! A single JSON file maps each user-selected path to its resume state. The
//! whole file is rewritten on every save; a missing or corrupt file reads as
//! an empty store. Resume data is a disposable cache, so corruption is never
//! surfaced as an error.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::media::probe::format_hms;

/// Resume state for one user-selected path.
///
/// `original_path` is the identity key exactly as the user selected it: no
/// canonicalization, symlink aliases stay distinct sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// File or folder the user selected.
    pub original_path: String,
    /// Whether `original_path` is a directory; set at creation, never changed.
    pub is_folder: bool,
    /// Absolute path of the specific file last exited from.
    pub last_played_file: String,
    /// Position within `last_played_file` at exit, in seconds.
    pub last_played_position: f64,
    /// When this entry was last updated.
    pub last_played_timestamp: DateTime<Utc>,
}

impl Session {
    /// The stored position as `H:MM:SS` for display.
    pub fn position_hms(&self) -> String {
        format_hms(self.last_played_position)
    }
}

/// Whole-file JSON store keyed by original selection path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The well-known store location: `~/.cache/mpv-recall/sessions.json`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::cache_dir().context("Could not determine cache directory")?;
        Ok(base.join("mpv-recall").join("sessions.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every session. Missing or malformed file reads as empty.
    pub fn load_all(&self) -> BTreeMap<String, Session> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Serialize the full mapping, overwriting the file.
    pub fn save_all(&self, sessions: &BTreeMap<String, Session>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(sessions)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = sessions.len(), "session store written");
        Ok(())
    }

    /// Look up one session by its original path.
    pub fn get(&self, key: &str) -> Option<Session> {
        self.load_all().remove(key)
    }

    /// Insert or replace the session keyed by its original path.
    ///
    /// Reloads immediately before mutating to keep the read-modify-write
    /// window as small as possible.
    pub fn upsert(&self, session: Session) -> Result<()> {
        let mut all = self.load_all();
        all.insert(session.original_path.clone(), session);
        self.save_all(&all)
    }

    /// Remove a session. Returns whether it existed; absent keys are a no-op.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut all = self.load_all();
        if all.remove(key).is_none() {
            return Ok(false);
        }
        self.save_all(&all)?;
        Ok(true)
    }

    /// The session updated most recently, if any.
    pub fn most_recent(&self) -> Option<Session> {
        self.load_all()
            .into_values()
            .max_by_key(|s| s.last_played_timestamp)
    }
}
