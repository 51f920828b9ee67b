//! Path resolution utilities for CLI commands

use std::env;
use std::path::{Path, PathBuf};

/// Directory store discovery starts from: the current directory, or "."
pub fn resolve_root_path() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// `path` as given if absolute, otherwise relative to `root`
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
