//! Store configuration for tagdraw
//!
//! Configuration is stored in `<store>/config.toml`.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bank::KindSource;
use crate::error::{Result, TagdrawError};
use crate::kinds::KindDescriptor;

pub use types::{KindConfig, StoreConfig, STORE_FORMAT_VERSION};

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;

        if config.version > STORE_FORMAT_VERSION {
            return Err(TagdrawError::InvalidStore {
                reason: format!(
                    "config version {} is newer than supported version {}",
                    config.version, STORE_FORMAT_VERSION
                ),
            });
        }
        if config.kinds.is_empty() {
            tracing::warn!(path = %path.display(), "config lists no question kinds");
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TagdrawError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl KindSource for StoreConfig {
    fn kinds(&self) -> Result<Vec<KindDescriptor>> {
        Ok(self
            .kinds
            .iter()
            .map(|(name, kind)| KindDescriptor::new(name.clone(), kind.random, kind.manual))
            .collect())
    }
}
