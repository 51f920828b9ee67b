//! Per-job foreign → local id mapping

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::{Result, TagdrawError};
use crate::model::QuestionId;

/// Entity kinds whose ids are remapped during an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappedEntity {
    Category,
    Question,
    Tag,
}

impl fmt::Display for MappedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappedEntity::Category => write!(f, "category"),
            MappedEntity::Question => write!(f, "question"),
            MappedEntity::Tag => write!(f, "tag"),
        }
    }
}

/// Foreign → local ids for one import job.
///
/// Owned by a single job and filled as foreign entities are first met; a
/// second lookup of the same foreign id is served from here.
#[derive(Debug, Default)]
pub struct IdMapping {
    ids: HashMap<(MappedEntity, i64), i64>,
    created_questions: BTreeSet<QuestionId>,
}

impl IdMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mapping; returns the previous local id if one existed
    pub fn insert(&mut self, entity: MappedEntity, foreign: i64, local: i64) -> Option<i64> {
        self.ids.insert((entity, foreign), local)
    }

    pub fn get(&self, entity: MappedEntity, foreign: i64) -> Option<i64> {
        self.ids.get(&(entity, foreign)).copied()
    }

    /// Like [`get`](Self::get), but a missing mapping is a not-found error
    pub fn require(&self, entity: MappedEntity, foreign: i64) -> Result<i64> {
        self.get(entity, foreign).ok_or_else(|| {
            TagdrawError::not_found(&format!("{} mapping for", entity), foreign)
        })
    }

    /// Remember that this job created `question_id` (for post-import fix-ups)
    pub fn mark_created(&mut self, question_id: QuestionId) {
        self.created_questions.insert(question_id);
    }

    pub fn created_questions(&self) -> &BTreeSet<QuestionId> {
        &self.created_questions
    }

    pub fn len(&self, entity: MappedEntity) -> usize {
        self.ids.keys().filter(|(e, _)| *e == entity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_do_not_collide() {
        let mut mapping = IdMapping::new();
        mapping.insert(MappedEntity::Tag, 5, 50);
        mapping.insert(MappedEntity::Question, 5, 500);

        assert_eq!(mapping.get(MappedEntity::Tag, 5), Some(50));
        assert_eq!(mapping.get(MappedEntity::Question, 5), Some(500));
        assert_eq!(mapping.get(MappedEntity::Category, 5), None);
        assert_eq!(mapping.len(MappedEntity::Tag), 1);
    }

    #[test]
    fn test_require_reports_missing_mapping() {
        let mapping = IdMapping::new();
        let err = mapping.require(MappedEntity::Question, 42).unwrap_err();
        assert_eq!(err.to_string(), "question mapping for not found: 42");
    }
}
