//! SQLite database schema for tagdraw

use rusqlite::Connection;

use crate::error::{Result, TagdrawError};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Fresh database, schema just created
    Created,
    /// Existing database already at the current version
    Current,
}

const SCHEMA_SQL: &str = r#"
-- Category tree
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    parent_id INTEGER REFERENCES categories(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_id);

-- Question bank
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    name TEXT NOT NULL DEFAULT '',
    kind TEXT NOT NULL,
    text TEXT NOT NULL DEFAULT '',
    hidden INTEGER NOT NULL DEFAULT 0,
    parent_id INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category_id);
CREATE INDEX IF NOT EXISTS idx_questions_kind ON questions(kind);

-- Tag dictionary (names are the portable key)
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE TABLE IF NOT EXISTS question_tags (
    question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
    tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
    PRIMARY KEY (question_id, tag_id)
);
CREATE INDEX IF NOT EXISTS idx_question_tags_tag ON question_tags(tag_id);

-- Selector configs, keyed by their selector question
CREATE TABLE IF NOT EXISTS selectors (
    question_id INTEGER PRIMARY KEY REFERENCES questions(id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL,
    include_subcategories INTEGER NOT NULL DEFAULT 0,
    include_mode INTEGER NOT NULL DEFAULT 1
);

-- Selector include/exclude rows
CREATE TABLE IF NOT EXISTS selector_tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    selector_id INTEGER NOT NULL REFERENCES selectors(question_id) ON DELETE CASCADE,
    tag_id INTEGER NOT NULL,
    included INTEGER NOT NULL,
    UNIQUE (selector_id, tag_id, included)
);
CREATE INDEX IF NOT EXISTS idx_selector_tags_selector ON selector_tags(selector_id);

-- Store metadata
CREATE TABLE IF NOT EXISTS index_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

fn stored_version(conn: &Connection) -> Option<i32> {
    conn.query_row(
        "SELECT value FROM index_meta WHERE key = 'schema_version'",
        [],
        |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
    )
    .ok()
}

/// Create the schema on a fresh database, or check the version of an existing one.
///
/// Unlike a rebuildable index, this database is the primary copy of the
/// data, so an unknown version is refused instead of dropped.
pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    match stored_version(conn) {
        None => {
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| TagdrawError::db_operation("create database schema", e))?;
            conn.execute(
                "INSERT INTO index_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )
            .map_err(|e| TagdrawError::db_operation("record schema version", e))?;
            tracing::info!(version = CURRENT_SCHEMA_VERSION, "database schema created");
            Ok(SchemaCreateResult::Created)
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => Ok(SchemaCreateResult::Current),
        Some(v) => Err(TagdrawError::InvalidStore {
            reason: format!(
                "database schema version {} is not supported (expected {})",
                v, CURRENT_SCHEMA_VERSION
            ),
        }),
    }
}

#[cfg(test)]
pub fn force_set_schema_version(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('schema_version', ?1)",
        [&version.to_string()],
    )?;
    Ok(())
}
