//! mpv-recall: resume media playback exactly where you left off.
//!
//! Tracks playback position of files and folders played through mpv. The
//! player is run as a blocking child process with a machine-parseable status
//! line on its terminal output; the last status line of a run becomes the
//! resume point, persisted in a small JSON store keyed by the path the user
//! originally selected.

pub mod config;
pub mod media;
pub mod picker;
pub mod player;
pub mod session;
pub mod store;

pub use config::Config;
pub use player::{LaunchPlan, Launcher, PlayerError};
pub use session::{resume_plan, Orchestrator, Outcome, ResumePlan, SessionError};
pub use store::{Session, SessionStore};
