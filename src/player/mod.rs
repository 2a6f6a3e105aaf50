//! External player invocation.
//!
//! The player runs as a blocking child process with its output captured.
//! Resume parameters travel as plain mpv flags, except folder resume with an
//! anchor file, which installs a temporary single-fire Lua seek hook (see
//! [`seek_hook`]). The hook script is deleted on every exit path.

pub mod seek_hook;
pub mod status;

pub use status::{parse_status, StatusLine, MIN_RESUME_SECS, STATUS_MARKER};

use seek_hook::SeekHook;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::debug;

/// Errors from launching the external player.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player '{command}' not found in PATH. Install mpv, or set player.command in the config.")]
    NotFound { command: String },

    #[error("Failed to run player: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and how playback should start.
///
/// The default plan starts from the beginning with no playlist index and no
/// anchor. `anchor` combined with `playlist_start` requests the single-fire
/// seek hook instead of a plain `--start` flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchPlan {
    /// Seconds to seek to, when present.
    pub start_offset: Option<f64>,
    /// Zero-based playlist index to begin at, for folder targets.
    pub playlist_start: Option<usize>,
    /// File within the playlist the offset applies to.
    pub anchor: Option<PathBuf>,
}

/// Invokes the external player and captures its output.
#[derive(Debug, Clone)]
pub struct Launcher {
    command: String,
}

impl Launcher {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Play `target`, blocking until the player exits.
    ///
    /// Returns the parsed exit status, or `None` when the run produced no
    /// usable status line. A non-zero player exit is tolerated: mpv exits
    /// non-zero on user-initiated close, and the output is still parsed.
    pub fn launch(
        &self,
        target: &Path,
        plan: &LaunchPlan,
    ) -> Result<Option<StatusLine>, PlayerError> {
        // Held across the child's lifetime; dropping removes the script on
        // every exit path, including errors below.
        let mut hook_script: Option<NamedTempFile> = None;

        if use_seek_hook(target, plan) {
            let hook = SeekHook::new(plan.start_offset.unwrap_or(0.0));
            hook_script = Some(write_hook_script(&hook)?);
        }

        let script_path = hook_script.as_ref().map(|file| file.path().to_path_buf());
        let args = build_args(target, plan, script_path.as_deref());

        debug!(
            player = %self.command,
            target = %target.display(),
            hook = script_path.is_some(),
            "launching player"
        );

        let output = Command::new(&self.command)
            .args(&args)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => PlayerError::NotFound {
                    command: self.command.clone(),
                },
                _ => PlayerError::Io(e),
            })?;

        debug!(code = ?output.status.code(), "player exited");

        // Only the last marker line in the combined output is authoritative.
        let mut raw = String::from_utf8_lossy(&output.stdout).into_owned();
        raw.push('\n');
        raw.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(parse_status(&raw))
    }
}

/// Whether this launch needs the single-fire seek hook.
///
/// Only folder resume at a known playlist position anchors the seek to one
/// specific file; everything else uses plain flags.
fn use_seek_hook(target: &Path, plan: &LaunchPlan) -> bool {
    plan.anchor.is_some() && plan.playlist_start.is_some() && target.is_dir()
}

/// Build the mpv argument list for a launch.
fn build_args(target: &Path, plan: &LaunchPlan, hook_script: Option<&Path>) -> Vec<String> {
    let mut args = vec![
        "--force-window".to_string(),
        format!(
            "--term-status-msg={}PATH:${{path}}#POS:${{playback-time}}",
            STATUS_MARKER
        ),
    ];

    if let Some(script) = hook_script {
        if let Some(index) = plan.playlist_start {
            args.push(format!("--playlist-start={}", index));
        }
        args.push(format!("--script={}", script.display()));
    } else {
        if let Some(offset) = plan.start_offset {
            args.push(format!("--start={}", offset));
        }
        if let Some(index) = plan.playlist_start {
            args.push(format!("--playlist-start={}", index));
        }
    }

    args.push(target.to_string_lossy().into_owned());
    args
}

fn write_hook_script(hook: &SeekHook) -> Result<NamedTempFile, PlayerError> {
    let mut file = tempfile::Builder::new()
        .prefix("mpv-recall-seek-")
        .suffix(".lua")
        .tempfile()?;
    file.write_all(hook.render_lua().as_bytes())?;
    file.flush()?;
    Ok(file)
}
