//! Best-effort media metadata for display.
//!
//! Everything here is cosmetic: probing failures degrade to zeros and empty
//! strings, never to errors.

use chrono::{DateTime, Local};
use humansize::{format_size, DECIMAL};
use std::path::Path;
use std::process::Command;

/// Display metadata for a single media file.
#[derive(Debug, Clone, Default)]
pub struct FileMetadata {
    /// Human-readable file size, e.g. "1.24 GB".
    pub size: String,
    /// Duration as `H:MM:SS`, or "0:00:00" when probing failed.
    pub duration: String,
    /// Last-modified time formatted as `%Y-%m-%d %H:%M`.
    pub modified: String,
}

impl FileMetadata {
    /// Collect size, duration and mtime for `path`.
    pub fn collect(path: &Path, probe_command: &str) -> Self {
        let meta = match std::fs::metadata(path) {
            Ok(meta) => meta,
            Err(_) => return Self::default(),
        };

        let size = format_size(meta.len(), DECIMAL);

        let modified = meta
            .modified()
            .ok()
            .map(|mtime| {
                let local: DateTime<Local> = mtime.into();
                local.format("%Y-%m-%d %H:%M").to_string()
            })
            .unwrap_or_default();

        let duration = format_hms(probe_duration(path, probe_command));

        Self {
            size,
            duration,
            modified,
        }
    }
}

/// Query ffprobe for the duration of `path` in seconds.
///
/// Returns 0.0 on any failure: missing binary, non-zero exit, or output
/// that does not parse as a float.
pub fn probe_duration(path: &Path, probe_command: &str) -> f64 {
    let output = Command::new(probe_command)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output();

    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Format whole seconds as `H:MM:SS`.
pub fn format_hms(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{}:{:02}:{:02}", h, m, s)
}
