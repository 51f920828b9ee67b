//! Collaborator interfaces the selection core reads from and writes to
//!
//! The core never talks to storage directly; everything goes through these
//! traits. [`crate::db::Database`] implements all of them on SQLite.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::kinds::KindDescriptor;
use crate::model::{
    CategoryId, QuestionId, QuestionRecord, SelectorConfig, SelectorId, Tag, TagAssociation, TagId,
};

/// Question bank reads
pub trait QuestionStore {
    /// All questions in any of `categories` whose kind is not in `excluded_kinds`
    fn questions_in(
        &self,
        categories: &BTreeSet<CategoryId>,
        excluded_kinds: &BTreeSet<String>,
    ) -> Result<Vec<QuestionRecord>>;

    /// Tag ids attached to a question
    fn tags_of(&self, question_id: QuestionId) -> Result<BTreeSet<TagId>>;
}

/// Category tree reads
pub trait CategoryStore {
    /// All strict descendants of `category_id` (children, grandchildren, ...)
    fn descendants(&self, category_id: CategoryId) -> Result<BTreeSet<CategoryId>>;
}

/// Tag dictionary
pub trait TagStore {
    fn find_tag_by_name(&self, name: &str) -> Result<Option<TagId>>;

    /// Look up a tag by name, creating it when missing
    fn find_or_create_tag_by_name(&self, name: &str) -> Result<TagId>;

    fn name_of(&self, tag_id: TagId) -> Result<Option<String>>;

    /// Tags attached to at least one question in `categories`, ordered by name
    fn tags_used_in(&self, categories: &BTreeSet<CategoryId>) -> Result<Vec<Tag>>;
}

/// Enumerates every known question kind with its capability flags
pub trait KindSource {
    fn kinds(&self) -> Result<Vec<KindDescriptor>>;
}

impl KindSource for [KindDescriptor] {
    fn kinds(&self) -> Result<Vec<KindDescriptor>> {
        Ok(self.to_vec())
    }
}

impl KindSource for Vec<KindDescriptor> {
    fn kinds(&self) -> Result<Vec<KindDescriptor>> {
        Ok(self.clone())
    }
}

/// Selector persistence
pub trait SelectorStore {
    fn load_selector(&self, selector_id: SelectorId) -> Result<Option<SelectorConfig>>;

    /// Replace the selector's config and tag rows in one atomic step.
    /// Returns the rows as stored.
    fn save_selector(
        &self,
        selector_id: SelectorId,
        config: &SelectorConfig,
    ) -> Result<Vec<TagAssociation>>;

    /// Delete a selector and, by cascade, its tag rows
    fn delete_selector(&self, selector_id: SelectorId) -> Result<bool>;

    fn tag_associations(&self, selector_id: SelectorId) -> Result<Vec<TagAssociation>>;

    fn selector_ids(&self) -> Result<Vec<SelectorId>>;

    /// Rewrite blank placeholder text on the given selector questions to `marker`.
    /// Returns how many questions changed.
    fn fill_blank_placeholders(
        &self,
        question_ids: &BTreeSet<QuestionId>,
        marker: &str,
    ) -> Result<usize>;
}
