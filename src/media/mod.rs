//! Media file discovery.
//!
//! The scan order defines playlist index semantics: mpv sorts a directory
//! playlist lexicographically, and resume-by-index only works if we sort
//! the same way.

pub mod probe;

use std::path::{Path, PathBuf};

/// List playable files in `folder`, non-recursive.
///
/// Keeps regular files whose name ends (case-insensitively) with one of the
/// allowed extensions, sorted lexicographically ascending on the full path.
/// Any enumeration failure yields an empty list; callers treat empty as
/// "nothing to play", not as a distinct error.
pub fn list_media(folder: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_media_extension(path, extensions))
        .collect();

    files.sort();
    files
}

/// Check whether a file name carries one of the allowed extensions.
fn has_media_extension(path: &Path, extensions: &[String]) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_lowercase(),
        None => return false,
    };
    extensions
        .iter()
        .any(|ext| name.ends_with(&format!(".{}", ext.to_lowercase())))
}
