use std::collections::BTreeSet;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::bank::TagStore;
use crate::error::{Result, TagdrawError};
use crate::{bail_invalid, map_db_err};
use crate::model::{CategoryId, Tag, TagId};

impl super::Database {
    /// Every tag in the dictionary, ordered by name
    pub fn all_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags ORDER BY name COLLATE NOCASE")
            .map_err(|e| map_db_err!("prepare tag list", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| map_db_err!("list tags", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read tag row", e))
    }
}

impl TagStore for super::Database {
    fn find_tag_by_name(&self, name: &str) -> Result<Option<TagId>> {
        self.conn
            .query_row(
                "SELECT id FROM tags WHERE name = ?1",
                params![name.trim()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| map_db_err!("look up tag", e))
    }

    fn find_or_create_tag_by_name(&self, name: &str) -> Result<TagId> {
        let name = name.trim();
        if name.is_empty() {
            bail_invalid!("tag name", "(empty)");
        }
        let inserted = self
            .conn
            .execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", params![name])
            .map_err(|e| map_db_err!("create tag", e))?;
        if inserted > 0 {
            tracing::debug!(tag = name, "tag created");
        }
        self.find_tag_by_name(name)?
            .ok_or_else(|| TagdrawError::not_found("tag", name))
    }

    fn name_of(&self, tag_id: TagId) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT name FROM tags WHERE id = ?1",
                params![tag_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| map_db_err!("read tag name", e))
    }

    fn tags_used_in(&self, categories: &BTreeSet<CategoryId>) -> Result<Vec<Tag>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT DISTINCT t.id, t.name FROM tags t
             JOIN question_tags qt ON qt.tag_id = t.id
             JOIN questions q ON q.id = qt.question_id
             WHERE q.category_id IN ({})
             ORDER BY t.name COLLATE NOCASE",
            vec!["?"; categories.len()].join(", ")
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| map_db_err!("prepare used-tag query", e))?;
        let rows = stmt
            .query_map(
                params_from_iter(categories.iter().map(|&id| Value::Integer(id))),
                |row| {
                    Ok(Tag {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .map_err(|e| map_db_err!("query used tags", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read used tag row", e))
    }
}
