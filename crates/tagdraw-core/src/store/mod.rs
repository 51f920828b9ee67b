//! Store management for tagdraw
//!
//! The store is the directory holding the question bank database and its
//! configuration. Default location: `.tagdraw/` under a project root.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::db::{Database, DB_FILE};
use crate::error::{Result, TagdrawError};
use crate::kinds::KindFilter;
use crate::service::Selector;
use paths::{CONFIG_FILE, DEFAULT_STORE_DIR};

/// The tagdraw store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    /// Kind partition computed from the configuration at open
    kinds: KindFilter,
    /// SQLite database
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given directory
    pub fn discover(start: &Path) -> Result<Self> {
        let store_path = paths::discover_store(start)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(TagdrawError::StoreNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.join(DB_FILE).exists() {
            return Err(TagdrawError::InvalidStore {
                reason: format!("{} has no {}", path.display(), DB_FILE),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            StoreConfig::default()
        };

        Self::assemble(path, config)
    }

    /// Initialize a new store under the given project root
    pub fn init(project_root: &Path) -> Result<Self> {
        Self::init_at(&project_root.join(DEFAULT_STORE_DIR))
    }

    /// Initialize a store at an explicit store root path. Idempotent: an
    /// existing config is kept, an existing database is reused.
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            let config = StoreConfig::default();
            config.save(&config_path)?;
            config
        };

        tracing::info!(store = %store_root.display(), "store initialized");
        Self::assemble(store_root, config)
    }

    fn assemble(root: &Path, config: StoreConfig) -> Result<Self> {
        let kinds = KindFilter::compute(&config)?;
        let db = Database::open(root)?;
        Ok(Store {
            root: root.to_path_buf(),
            config,
            kinds,
            db,
        })
    }

    /// Get the store root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Get the database file path
    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    /// Get the config
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the kind partition
    pub fn kinds(&self) -> &KindFilter {
        &self.kinds
    }

    /// Get the database
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Selector facade over this store's bank
    pub fn selector(&self) -> Selector<'_, Database> {
        Selector::new(&self.db, &self.kinds)
    }
}

#[cfg(test)]
mod tests;
