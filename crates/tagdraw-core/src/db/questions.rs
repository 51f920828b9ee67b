use std::collections::BTreeSet;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::bank::{CategoryStore, QuestionStore, TagStore};
use crate::error::{Result, TagdrawError};
use crate::bail_invalid;
use crate::kinds::SELECTOR_KIND;
use crate::model::{subcategory_placeholder, Category, CategoryId, QuestionId, QuestionRecord, TagId};

/// Input for a new bank question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub category_id: CategoryId,
    pub name: String,
    pub kind: String,
    pub text: String,
    pub hidden: bool,
    pub parent_id: QuestionId,
}

impl NewQuestion {
    pub fn new(category_id: CategoryId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            category_id,
            name: name.into(),
            kind: kind.into(),
            text: String::new(),
            hidden: false,
            parent_id: 0,
        }
    }
}

/// Full question row, as listed and exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuestion {
    pub id: QuestionId,
    pub category_id: CategoryId,
    pub name: String,
    pub kind: String,
    pub text: String,
    pub hidden: bool,
    pub parent_id: QuestionId,
    pub tags: Vec<String>,
}

impl StoredQuestion {
    pub fn record(&self) -> QuestionRecord {
        QuestionRecord {
            id: self.id,
            category_id: self.category_id,
            kind: self.kind.clone(),
            hidden: self.hidden,
            parent_id: self.parent_id,
        }
    }
}

const QUESTION_COLUMNS: &str = "id, category_id, name, kind, text, hidden, parent_id";

fn stored_question_from_row(row: &Row<'_>) -> rusqlite::Result<StoredQuestion> {
    Ok(StoredQuestion {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
        kind: row.get(3)?,
        text: row.get(4)?,
        hidden: row.get::<_, i64>(5)? != 0,
        parent_id: row.get(6)?,
        tags: Vec::new(),
    })
}

/// `?, ?, ?` for an IN list of `n` values
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl super::Database {
    pub fn create_category(&self, name: &str, parent_id: Option<CategoryId>) -> Result<CategoryId> {
        if name.trim().is_empty() {
            bail_invalid!("category name", "(empty)");
        }
        if let Some(parent) = parent_id {
            if self.category(parent)?.is_none() {
                return Err(TagdrawError::not_found("category", parent));
            }
        }
        self.conn
            .execute(
                "INSERT INTO categories (name, parent_id) VALUES (?1, ?2)",
                params![name, parent_id],
            )
            .map_err(|e| TagdrawError::db_operation("create category", e))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(category_id = id, name, "category created");
        Ok(id)
    }

    pub fn category(&self, category_id: CategoryId) -> Result<Option<Category>> {
        self.conn
            .query_row(
                "SELECT id, name, parent_id FROM categories WHERE id = ?1",
                params![category_id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        parent_id: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| TagdrawError::db_operation("read category", e))
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, parent_id FROM categories ORDER BY id")
            .map_err(|e| TagdrawError::db_operation("prepare category list", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    parent_id: row.get(2)?,
                })
            })
            .map_err(|e| TagdrawError::db_operation("list categories", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TagdrawError::db_operation("read category row", e))
    }

    /// Insert a question and attach `tags` by name, creating missing tags
    pub fn create_question(&self, question: &NewQuestion, tags: &[String]) -> Result<QuestionId> {
        if self.category(question.category_id)?.is_none() {
            return Err(TagdrawError::not_found("category", question.category_id));
        }
        if question.kind.trim().is_empty() {
            bail_invalid!("question kind", "(empty)");
        }

        let id = self.with_savepoint("create_question", |db| {
            db.conn
                .execute(
                    "INSERT INTO questions (category_id, name, kind, text, hidden, parent_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        question.category_id,
                        question.name,
                        question.kind,
                        question.text,
                        question.hidden as i64,
                        question.parent_id,
                    ],
                )
                .map_err(|e| TagdrawError::db_operation("insert question", e))?;
            let id = db.conn.last_insert_rowid();

            for name in tags {
                let tag_id = db.find_or_create_tag_by_name(name)?;
                db.conn
                    .execute(
                        "INSERT OR IGNORE INTO question_tags (question_id, tag_id) VALUES (?1, ?2)",
                        params![id, tag_id],
                    )
                    .map_err(|e| TagdrawError::db_operation("attach question tag", e))?;
            }
            Ok(id)
        })?;

        tracing::debug!(question_id = id, kind = %question.kind, tags = tags.len(), "question created");
        Ok(id)
    }

    /// Insert the question row a selector lives on.
    ///
    /// The row is its own parent, which keeps it out of every candidate pool,
    /// and its text carries the subcategory placeholder.
    pub fn create_selector_question(
        &self,
        category_id: CategoryId,
        include_subcategories: bool,
    ) -> Result<QuestionId> {
        let mut new = NewQuestion::new(category_id, "", SELECTOR_KIND);
        new.text = subcategory_placeholder(include_subcategories).to_string();
        self.create_selector_question_with(&new)
    }

    /// Insert a selector question with caller-supplied name and text (import)
    pub fn create_selector_question_with(&self, question: &NewQuestion) -> Result<QuestionId> {
        let mut new = question.clone();
        new.kind = SELECTOR_KIND.to_string();
        new.parent_id = 0;
        self.with_savepoint("create_selector_question", |db| {
            let id = db.create_question(&new, &[])?;
            db.conn
                .execute(
                    "UPDATE questions SET parent_id = id WHERE id = ?1",
                    params![id],
                )
                .map_err(|e| TagdrawError::db_operation("link selector question", e))?;
            Ok(id)
        })
    }

    pub fn question(&self, question_id: QuestionId) -> Result<Option<StoredQuestion>> {
        let sql = format!("SELECT {} FROM questions WHERE id = ?1", QUESTION_COLUMNS);
        let found = self
            .conn
            .query_row(&sql, params![question_id], stored_question_from_row)
            .optional()
            .map_err(|e| TagdrawError::db_operation("read question", e))?;
        match found {
            Some(mut q) => {
                q.tags = self.question_tag_names(q.id)?;
                Ok(Some(q))
            }
            None => Ok(None),
        }
    }

    /// Every question in id order, tags included
    pub fn questions(&self) -> Result<Vec<StoredQuestion>> {
        let sql = format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| TagdrawError::db_operation("prepare question list", e))?;
        let rows = stmt
            .query_map([], stored_question_from_row)
            .map_err(|e| TagdrawError::db_operation("list questions", e))?;
        let mut questions = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TagdrawError::db_operation("read question row", e))?;
        for q in &mut questions {
            q.tags = self.question_tag_names(q.id)?;
        }
        Ok(questions)
    }

    pub fn question_tag_names(&self, question_id: QuestionId) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.name FROM question_tags qt JOIN tags t ON t.id = qt.tag_id
                 WHERE qt.question_id = ?1 ORDER BY t.name",
            )
            .map_err(|e| TagdrawError::db_operation("prepare question tags", e))?;
        let rows = stmt
            .query_map(params![question_id], |row| row.get::<_, String>(0))
            .map_err(|e| TagdrawError::db_operation("read question tags", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TagdrawError::db_operation("read question tag row", e))
    }
}

impl QuestionStore for super::Database {
    fn questions_in(
        &self,
        categories: &BTreeSet<CategoryId>,
        excluded_kinds: &BTreeSet<String>,
    ) -> Result<Vec<QuestionRecord>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = format!(
            "SELECT id, category_id, kind, hidden, parent_id FROM questions WHERE category_id IN ({})",
            placeholders(categories.len())
        );
        if !excluded_kinds.is_empty() {
            sql.push_str(&format!(
                " AND kind NOT IN ({})",
                placeholders(excluded_kinds.len())
            ));
        }
        sql.push_str(" ORDER BY id");

        let values: Vec<Value> = categories
            .iter()
            .map(|&id| Value::Integer(id))
            .chain(excluded_kinds.iter().map(|k| Value::Text(k.clone())))
            .collect();

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| TagdrawError::db_operation("prepare candidate query", e))?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| {
                Ok(QuestionRecord {
                    id: row.get(0)?,
                    category_id: row.get(1)?,
                    kind: row.get(2)?,
                    hidden: row.get::<_, i64>(3)? != 0,
                    parent_id: row.get(4)?,
                })
            })
            .map_err(|e| TagdrawError::db_operation("query candidate questions", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TagdrawError::db_operation("read candidate row", e))
    }

    fn tags_of(&self, question_id: QuestionId) -> Result<BTreeSet<TagId>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT tag_id FROM question_tags WHERE question_id = ?1")
            .map_err(|e| TagdrawError::db_operation("prepare tag lookup", e))?;
        let rows = stmt
            .query_map(params![question_id], |row| row.get::<_, TagId>(0))
            .map_err(|e| TagdrawError::db_operation("read question tags", e))?;
        rows.collect::<rusqlite::Result<BTreeSet<_>>>()
            .map_err(|e| TagdrawError::db_operation("read question tag row", e))
    }
}

impl CategoryStore for super::Database {
    fn descendants(&self, category_id: CategoryId) -> Result<BTreeSet<CategoryId>> {
        // UNION (not UNION ALL) stops on a malformed cyclic tree
        let mut stmt = self
            .conn
            .prepare(
                "WITH RECURSIVE sub(id) AS (
                    SELECT id FROM categories WHERE parent_id = ?1
                    UNION
                    SELECT c.id FROM categories c JOIN sub ON c.parent_id = sub.id
                 )
                 SELECT id FROM sub",
            )
            .map_err(|e| TagdrawError::db_operation("prepare category descent", e))?;
        let rows = stmt
            .query_map(params![category_id], |row| row.get::<_, CategoryId>(0))
            .map_err(|e| TagdrawError::db_operation("walk category tree", e))?;
        let mut found = rows
            .collect::<rusqlite::Result<BTreeSet<_>>>()
            .map_err(|e| TagdrawError::db_operation("read category row", e))?;
        found.remove(&category_id);
        Ok(found)
    }
}
