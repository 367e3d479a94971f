use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Checks if stdout is connected to a terminal.
pub fn is_stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Checks if a path is hidden (starts with a dot).
pub fn is_hidden_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|s| s.starts_with('.') && s != "." && s != "..")
        .unwrap_or(false)
}

/// Checks if a directory entry is hidden (for walkdir)
pub fn is_hidden_walkdir(entry: &walkdir::DirEntry) -> bool {
    // The root is always walked, even when called as `.` or `.styles`.
    entry.depth() > 0 && is_hidden_path(entry.path())
}

/// True when `path` has one of `extensions` (compared case-insensitively, without the dot).
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Finds style sheets below `base_path`, skipping hidden files and directories.
///
/// The result is sorted so reports come out in a stable order.
pub fn find_stylesheets(base_path: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry_result in WalkDir::new(base_path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden_walkdir(e))
    {
        match entry_result {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                if err.depth() == 0 {
                    return Err(err)
                        .wrap_err_with(|| format!("Failed to read directory {}", base_path.display()));
                }
                warn!("Skipping unreadable entry: {}", err);
            }
        }
    }
    files.sort();
    debug!("Found {} style sheet(s) in {}", files.len(), base_path.display());
    Ok(files)
}
