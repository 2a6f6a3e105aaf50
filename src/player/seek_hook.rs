//! One-shot seek hook for folder resume.
//!
//! When resuming a folder playlist at a non-zero offset, the seek must apply
//! only to the file we left off in, not to every file the playlist loads
//! afterwards. The hook is a two-state machine (armed, then fired) that
//! yields the seek target exactly once. `render_lua` emits the same machine
//! as an mpv user script so the player runs it on its side.

/// Hook lifecycle: yields a seek exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Armed,
    Fired,
}

/// Single-fire absolute seek, applied on the first file-loaded event.
#[derive(Debug, Clone)]
pub struct SeekHook {
    target_secs: f64,
    state: HookState,
}

impl SeekHook {
    /// Create an armed hook targeting `target_secs` into the first file.
    pub fn new(target_secs: f64) -> Self {
        Self {
            target_secs,
            state: HookState::Armed,
        }
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    /// Handle a file-loaded event.
    ///
    /// Returns the absolute seek target on the first call, `None` on every
    /// call after that.
    pub fn on_file_loaded(&mut self) -> Option<f64> {
        match self.state {
            HookState::Armed => {
                self.state = HookState::Fired;
                Some(self.target_secs)
            }
            HookState::Fired => None,
        }
    }

    /// Render the hook as an mpv Lua user script.
    pub fn render_lua(&self) -> String {
        format!(
            r#"local sought = false
local target_time = {}

function on_file_loaded()
    if not sought then
        sought = true
        mp.commandv("seek", target_time, "absolute")
    end
end

mp.register_event("file-loaded", on_file_loaded)
"#,
            self.target_secs
        )
    }
}
