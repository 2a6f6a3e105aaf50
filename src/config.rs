//! Configuration loading and saving.
//!
//! Config lives at `~/.config/mpv-recall/config.toml`. Missing file or
//! missing fields fall back to defaults, so a fresh install works with no
//! config at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default media file extensions recognized by the scanner.
///
/// Matched case-insensitively against the end of the file name. This list
/// mirrors what mpv will happily open when handed a directory.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "webm", "mov", "m4v", "wmv", "flv", "ts", "mpg", "mpeg", "mp3", "flac",
    "ogg", "opus", "m4a", "wav", "aac", "wma",
];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub picker: PickerConfig,
    pub media: MediaConfig,
    pub store: StoreConfig,
}

/// External player settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Player executable to invoke.
    pub command: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
        }
    }
}

/// Native file-picker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Dialog executable to invoke.
    pub command: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            command: "zenity".to_string(),
        }
    }
}

/// Media scanning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// File extensions considered playable, without the leading dot.
    pub extensions: Vec<String>,
    /// Executable used for best-effort duration probing.
    pub probe_command: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            probe_command: "ffprobe".to_string(),
        }
    }
}

/// Session store settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Override for the session store file location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Path to the config file: `~/.config/mpv-recall/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("mpv-recall").join("config.toml"))
    }

    /// Load the config, falling back to defaults if the file is absent.
    ///
    /// A malformed config file is an error (unlike the session store, the
    /// config is user-authored and silently ignoring it would be confusing).
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Write the config back as pretty TOML, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
