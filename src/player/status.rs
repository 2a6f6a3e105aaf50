//! Parsing the player's terminal status output.
//!
//! mpv is launched with `--term-status-msg` so it keeps printing lines of
//! the form `[mpvRecall]PATH:<path>#POS:<H:MM:SS>` while playing. The last
//! such line in the captured output reflects the state at exit. Anything
//! that fails to parse is treated as "no usable status", never an error.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix marking machine-parseable status lines in the player output.
pub const STATUS_MARKER: &str = "[mpvRecall]";

/// Positions at or below this are not worth resuming.
pub const MIN_RESUME_SECS: f64 = 2.0;

static STATUS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PATH:(.*?)#POS:(\d{1,2}:\d{2}:\d{2})").expect("status pattern is valid")
});

/// The exit state recovered from a player run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    /// Absolute path of the file that was playing at exit.
    pub path: String,
    /// Playback position at exit, in seconds.
    pub position_secs: f64,
}

/// Extract the final played file and position from raw player output.
///
/// Carriage returns are normalized to line breaks first: mpv redraws its
/// status line with `\r`, so many updates share one physical line. Only the
/// last marker line counts. Returns `None` when no marker line is present,
/// the pattern does not match, or the position is at or below the
/// significance threshold.
pub fn parse_status(raw: &str) -> Option<StatusLine> {
    let normalized = raw.replace('\r', "\n");
    let last_marker = normalized
        .lines()
        .filter(|line| line.starts_with(STATUS_MARKER))
        .next_back()?;

    let caps = STATUS_PATTERN.captures(last_marker)?;
    let path = caps.get(1)?.as_str().to_string();
    let position_secs = parse_clock(caps.get(2)?.as_str())?;

    if position_secs <= MIN_RESUME_SECS {
        return None;
    }

    Some(StatusLine {
        path,
        position_secs,
    })
}

/// Convert `H:MM:SS` (1-2 digit hours) to total seconds.
fn parse_clock(clock: &str) -> Option<f64> {
    let mut parts = clock.split(':');
    let h: u32 = parts.next()?.parse().ok()?;
    let m: u32 = parts.next()?.parse().ok()?;
    let s: u32 = parts.next()?.parse().ok()?;
    Some(f64::from(h * 3600 + m * 60 + s))
}
