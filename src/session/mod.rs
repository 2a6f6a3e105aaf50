//! The resume-session protocol.
//!
//! Composes the scanner, launcher and store: resolves the correct start
//! offset and playlist index for a request, runs the player, and folds the
//! parsed exit status back into the store. Store writes follow the
//! load-mutate-save discipline; the store itself does the reload.

use crate::media;
use crate::player::{LaunchPlan, Launcher, PlayerError, StatusLine};
use crate::store::{Session, SessionStore};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("'{path}' no longer exists. It may have been moved or deleted.")]
    PathMissing { path: String },

    #[error("No media files found in '{path}'")]
    NoMedia { path: String },

    #[error("No saved session for '{key}'")]
    UnknownSession { key: String },

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// What a completed playback run did to the store.
#[derive(Debug)]
pub enum Outcome {
    /// A significant exit position was captured and persisted.
    Saved { session: Session, reset: bool },
    /// No usable status line; the store was left untouched.
    NothingToSave { reset: bool },
}

impl Outcome {
    /// Whether this run fell back to the start of the playlist because the
    /// anchor file vanished from the folder.
    pub fn was_reset(&self) -> bool {
        match self {
            Outcome::Saved { reset, .. } => *reset,
            Outcome::NothingToSave { reset } => *reset,
        }
    }
}

/// Launch parameters resolved for a resume, plus the fallback signal.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumePlan {
    pub launch: LaunchPlan,
    /// True when the recorded file is gone and playback restarts from the
    /// beginning of the playlist.
    pub reset: bool,
}

/// Resolve how to resume a session against a fresh folder listing.
///
/// File sessions resume at the stored offset directly. Folder sessions
/// locate the last played file in the listing: found, the plan anchors the
/// offset to it at its current playlist index; gone, the plan degrades to a
/// plain start-of-playlist launch with `reset` set.
pub fn resume_plan(session: &Session, listing: &[PathBuf]) -> ResumePlan {
    if !session.is_folder {
        return ResumePlan {
            launch: LaunchPlan {
                start_offset: Some(session.last_played_position),
                playlist_start: None,
                anchor: None,
            },
            reset: false,
        };
    }

    let anchor = Path::new(&session.last_played_file);
    match listing.iter().position(|path| path == anchor) {
        Some(index) => ResumePlan {
            launch: LaunchPlan {
                start_offset: Some(session.last_played_position),
                playlist_start: Some(index),
                anchor: Some(anchor.to_path_buf()),
            },
            reset: false,
        },
        None => ResumePlan {
            launch: LaunchPlan::default(),
            reset: true,
        },
    }
}

/// Drives the play/resume/delete state machine.
pub struct Orchestrator {
    store: SessionStore,
    launcher: Launcher,
    extensions: Vec<String>,
}

impl Orchestrator {
    pub fn new(store: SessionStore, launcher: Launcher, extensions: Vec<String>) -> Self {
        Self {
            store,
            launcher,
            extensions,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Play a fresh selection from the start and record where it stops.
    ///
    /// The selection must exist; a folder must contain at least one
    /// scannable media file. On a parse miss the store stays untouched.
    pub fn play_new(&self, path: &Path) -> Result<Outcome, SessionError> {
        if !path.exists() {
            return Err(SessionError::PathMissing {
                path: path.display().to_string(),
            });
        }
        let is_folder = path.is_dir();
        if is_folder && media::list_media(path, &self.extensions).is_empty() {
            return Err(SessionError::NoMedia {
                path: path.display().to_string(),
            });
        }

        let status = self.launcher.launch(path, &LaunchPlan::default())?;
        self.fold(path, is_folder, status, false)
    }

    /// Resume a saved session by its key.
    ///
    /// Fails with [`SessionError::PathMissing`] when the original selection
    /// is gone, so the caller can offer to delete the stale entry.
    pub fn resume(&self, key: &str) -> Result<Outcome, SessionError> {
        let session = self
            .store
            .get(key)
            .ok_or_else(|| SessionError::UnknownSession {
                key: key.to_string(),
            })?;

        let original = PathBuf::from(&session.original_path);
        if !original.exists() {
            return Err(SessionError::PathMissing {
                path: session.original_path.clone(),
            });
        }

        let plan = if session.is_folder {
            let listing = media::list_media(&original, &self.extensions);
            resume_plan(&session, &listing)
        } else {
            resume_plan(&session, &[])
        };

        if plan.reset {
            info!(key, "anchor file missing, restarting playlist from the top");
        }

        let status = self.launcher.launch(&original, &plan.launch)?;
        self.fold(&original, session.is_folder, status, plan.reset)
    }

    /// Delete a saved session. Idempotent; returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool, SessionError> {
        Ok(self.store.remove(key)?)
    }

    /// Fold a parsed exit status back into the store under `path`'s key.
    fn fold(
        &self,
        path: &Path,
        is_folder: bool,
        status: Option<StatusLine>,
        reset: bool,
    ) -> Result<Outcome, SessionError> {
        match status {
            Some(status) => {
                let session = Session {
                    original_path: path.to_string_lossy().into_owned(),
                    is_folder,
                    last_played_file: status.path,
                    last_played_position: status.position_secs,
                    last_played_timestamp: Utc::now(),
                };
                self.store.upsert(session.clone())?;
                info!(
                    key = %session.original_path,
                    position = session.last_played_position,
                    "session saved"
                );
                Ok(Outcome::Saved { session, reset })
            }
            None => Ok(Outcome::NothingToSave { reset }),
        }
    }
}
