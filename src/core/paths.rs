//! Path normalization utilities
//!
//! Relative paths are always emitted with '/' as separator.

use std::path::{Path, PathBuf};

use crate::core::config::PathStyle;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Path as printed in a file banner
pub fn display_path(path: &Path, relative: &str, style: PathStyle) -> String {
    match style {
        PathStyle::Relative => relative.to_string(),
        PathStyle::Absolute => normalize_path(&absolutize(path)),
    }
}

/// Canonical form when resolvable, otherwise joined onto the current directory
///
/// A path that does not exist yet (an output file) still resolves through its parent.
pub fn absolutize(path: &Path) -> PathBuf {
    if let Ok(p) = path.canonicalize() {
        return p;
    }
    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(p) = parent.canonicalize() {
            return p.join(name);
        }
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
