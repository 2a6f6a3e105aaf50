//! Native file selection dialog.
//!
//! Shells out to zenity (or whatever `picker.command` names). The selected
//! path arrives on stdout; a non-zero exit means the user cancelled.

use std::path::PathBuf;
use std::process::Command;

/// What kind of selection to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    File,
    Folder,
}

/// Errors from the selection dialog.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("'{command}' is not installed. Install it (e.g. `sudo apt install zenity`) or pass a path directly.")]
    NotFound { command: String },

    #[error("Selection cancelled")]
    Cancelled,

    #[error("File dialog failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the dialog and return the selected path.
pub fn pick(command: &str, mode: PickMode) -> Result<PathBuf, PickerError> {
    let mut cmd = Command::new(command);
    cmd.arg("--file-selection");
    if mode == PickMode::Folder {
        cmd.arg("--directory");
    }

    let output = cmd.output().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PickerError::NotFound {
            command: command.to_string(),
        },
        _ => PickerError::Io(e),
    })?;

    if !output.status.success() {
        return Err(PickerError::Cancelled);
    }

    let selection = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if selection.is_empty() {
        return Err(PickerError::Cancelled);
    }

    Ok(PathBuf::from(selection))
}
