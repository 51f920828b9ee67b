//! SQLite database module for tagdraw
//!
//! `Database` is the bundled implementation of every collaborator trait in
//! [`crate::bank`].

mod questions;
mod schema;
mod selectors;
mod tags;

use std::path::Path;

use crate::error::{Result, TagdrawError};
use rusqlite::Connection;

pub use questions::{NewQuestion, StoredQuestion};
pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};

/// Database file name inside a store directory
pub const DB_FILE: &str = "tagdraw.db";

/// SQLite database for tagdraw
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);
        let conn = Connection::open(&db_path).map_err(|e| {
            TagdrawError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| TagdrawError::Other(format!("failed to enable WAL mode: {}", e)))?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TagdrawError::Other(format!("failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    /// Run `f` inside a SQLite savepoint named `name`.
    ///
    /// Everything `f` writes is released on `Ok` and rolled back on `Err`.
    /// Savepoints nest, so a write helper that uses this can also run inside
    /// a larger job that does.
    pub fn with_savepoint<F, T>(&self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.conn
            .execute_batch(&format!("SAVEPOINT {}", name))
            .map_err(|e| TagdrawError::transaction(name, e))?;

        match f(self) {
            Ok(value) => {
                self.conn
                    .execute_batch(&format!("RELEASE {}", name))
                    .map_err(|e| TagdrawError::transaction(name, e))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = self
                    .conn
                    .execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name}"))
                {
                    tracing::error!(savepoint = name, error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| TagdrawError::Other(format!("failed to enable foreign keys: {}", e)))?;
        create_schema(&conn)?;
        Ok(Database { conn })
    }

    pub fn get_tag_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM tags", [], |r| r.get(0))
            .map_err(|e| TagdrawError::db_operation("get tag count", e))
    }

    pub fn get_selector_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM selectors", [], |r| r.get(0))
            .map_err(|e| TagdrawError::db_operation("get selector count", e))
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM index_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| TagdrawError::db_operation("get schema version", e))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint so the next process sees everything without replaying the WAL
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

#[cfg(test)]
mod tests;
