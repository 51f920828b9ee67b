use std::collections::BTreeSet;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::bank::{SelectorStore, TagStore};
use crate::error::{Result, TagdrawError};
use crate::kinds::SELECTOR_KIND;
use crate::model::{IncludeMode, QuestionId, SelectorConfig, SelectorId, TagAssociation};
use crate::naming;

impl super::Database {
    /// Fail unless `selector_id` is a selector-kind question
    fn require_selector_question(&self, selector_id: SelectorId) -> Result<()> {
        let kind: Option<String> = self
            .conn
            .query_row(
                "SELECT kind FROM questions WHERE id = ?1",
                params![selector_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| TagdrawError::db_operation("read selector question", e))?;
        match kind {
            None => Err(TagdrawError::SelectorNotFound { id: selector_id }),
            Some(kind) if kind != SELECTOR_KIND => Err(TagdrawError::invalid_value(
                "selector question kind",
                format!("question {} is a {}", selector_id, kind),
            )),
            Some(_) => Ok(()),
        }
    }

    /// Display name for a config, built from its include tag names
    fn name_for(&self, config: &SelectorConfig) -> Result<String> {
        let mut names = Vec::with_capacity(config.include_tags.len());
        for &tag_id in &config.include_tags {
            if let Some(name) = self.name_of(tag_id)? {
                names.push(name);
            }
        }
        names.sort();
        Ok(naming::selector_name(&names))
    }
}

impl SelectorStore for super::Database {
    fn load_selector(&self, selector_id: SelectorId) -> Result<Option<SelectorConfig>> {
        let header = self
            .conn
            .query_row(
                "SELECT category_id, include_subcategories, include_mode FROM selectors WHERE question_id = ?1",
                params![selector_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)? != 0,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| TagdrawError::db_operation("read selector", e))?;

        let Some((category_id, include_subcategories, mode_code)) = header else {
            return Ok(None);
        };

        let mut config = SelectorConfig::new(category_id)
            .with_subcategories(include_subcategories)
            .with_mode(IncludeMode::from_code(mode_code)?);
        config.apply_associations(&self.tag_associations(selector_id)?);
        Ok(Some(config))
    }

    fn save_selector(
        &self,
        selector_id: SelectorId,
        config: &SelectorConfig,
    ) -> Result<Vec<TagAssociation>> {
        self.require_selector_question(selector_id)?;
        let name = self.name_for(config)?;

        self.with_savepoint("save_selector", |db| {
            db.conn
                .execute(
                    "INSERT INTO selectors (question_id, category_id, include_subcategories, include_mode)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(question_id) DO UPDATE SET
                        category_id = excluded.category_id,
                        include_subcategories = excluded.include_subcategories,
                        include_mode = excluded.include_mode",
                    params![
                        selector_id,
                        config.category_id,
                        config.include_subcategories as i64,
                        config.include_mode.code(),
                    ],
                )
                .map_err(|e| TagdrawError::db_operation("write selector", e))?;

            db.conn
                .execute(
                    "DELETE FROM selector_tags WHERE selector_id = ?1",
                    params![selector_id],
                )
                .map_err(|e| TagdrawError::db_operation("clear selector tags", e))?;

            for row in config.associations(selector_id) {
                db.conn
                    .execute(
                        "INSERT INTO selector_tags (selector_id, tag_id, included) VALUES (?1, ?2, ?3)",
                        params![row.selector_id, row.tag_id, row.included as i64],
                    )
                    .map_err(|e| TagdrawError::db_operation("insert selector tag", e))?;
            }

            db.conn
                .execute(
                    "UPDATE questions SET name = ?1 WHERE id = ?2",
                    params![name, selector_id],
                )
                .map_err(|e| TagdrawError::db_operation("rename selector question", e))?;
            Ok(())
        })?;

        tracing::debug!(
            selector_id,
            include = config.include_tags.len(),
            exclude = config.exclude_tags.len(),
            "selector saved"
        );
        self.tag_associations(selector_id)
    }

    fn delete_selector(&self, selector_id: SelectorId) -> Result<bool> {
        // Removing the question row cascades to the selector and its tag rows
        let deleted = self
            .conn
            .execute(
                "DELETE FROM questions WHERE id = ?1 AND kind = ?2",
                params![selector_id, SELECTOR_KIND],
            )
            .map_err(|e| TagdrawError::db_operation("delete selector", e))?;
        if deleted > 0 {
            tracing::debug!(selector_id, "selector deleted");
        }
        Ok(deleted > 0)
    }

    fn tag_associations(&self, selector_id: SelectorId) -> Result<Vec<TagAssociation>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, selector_id, tag_id, included FROM selector_tags
                 WHERE selector_id = ?1 ORDER BY id",
            )
            .map_err(|e| TagdrawError::db_operation("prepare selector tags", e))?;
        let rows = stmt
            .query_map(params![selector_id], |row| {
                Ok(TagAssociation {
                    id: row.get(0)?,
                    selector_id: row.get(1)?,
                    tag_id: row.get(2)?,
                    included: row.get::<_, i64>(3)? != 0,
                })
            })
            .map_err(|e| TagdrawError::db_operation("read selector tags", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TagdrawError::db_operation("read selector tag row", e))
    }

    fn selector_ids(&self) -> Result<Vec<SelectorId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT question_id FROM selectors ORDER BY question_id")
            .map_err(|e| TagdrawError::db_operation("prepare selector list", e))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, SelectorId>(0))
            .map_err(|e| TagdrawError::db_operation("list selectors", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TagdrawError::db_operation("read selector row", e))
    }

    fn fill_blank_placeholders(
        &self,
        question_ids: &BTreeSet<QuestionId>,
        marker: &str,
    ) -> Result<usize> {
        if question_ids.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "UPDATE questions SET text = ? WHERE kind = ? AND TRIM(text) = '' AND id IN ({})",
            vec!["?"; question_ids.len()].join(", ")
        );
        let values: Vec<Value> = [
            Value::Text(marker.to_string()),
            Value::Text(SELECTOR_KIND.to_string()),
        ]
        .into_iter()
        .chain(question_ids.iter().map(|&id| Value::Integer(id)))
        .collect();

        self.conn
            .execute(&sql, params_from_iter(values))
            .map_err(|e| TagdrawError::db_operation("fill selector placeholders", e))
    }
}
