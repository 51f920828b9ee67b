//! Store layout and discovery

use std::path::{Path, PathBuf};

use crate::error::{Result, TagdrawError};

/// Default store directory name, created under a project root
pub const DEFAULT_STORE_DIR: &str = ".tagdraw";

/// Configuration file inside a store
pub const CONFIG_FILE: &str = "config.toml";

/// Walk up from `start` until a directory containing a store is found
pub fn discover_store(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(DEFAULT_STORE_DIR);
        if candidate.is_dir() {
            tracing::debug!(store = %candidate.display(), "store discovered");
            return Ok(candidate);
        }
        current = dir.parent();
    }
    Err(TagdrawError::StoreNotFound {
        path: start.to_path_buf(),
    })
}
