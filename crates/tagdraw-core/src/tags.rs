//! Tag lookup and resolution

use std::collections::BTreeSet;

use crate::bank::{CategoryStore, TagStore};
use crate::category::CategoryExpander;
use crate::error::{Result, TagdrawError};
use crate::model::{CategoryId, Tag, TagId};

/// Resolves tag names to ids (and back) and lists tags in use in a category tree
pub struct TagResolver<'a> {
    tags: &'a dyn TagStore,
    categories: &'a dyn CategoryStore,
}

impl<'a> TagResolver<'a> {
    pub fn new(tags: &'a dyn TagStore, categories: &'a dyn CategoryStore) -> Self {
        Self { tags, categories }
    }

    /// Resolve existing tag names to ids; an unknown name is an error
    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> Result<BTreeSet<TagId>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                self.tags
                    .find_tag_by_name(name)?
                    .ok_or_else(|| TagdrawError::not_found("tag", name))
            })
            .collect()
    }

    /// Names for `ids` in id order; ids without a tag row are skipped
    pub fn names_of(&self, ids: &BTreeSet<TagId>) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.tags.name_of(id)? {
                Some(name) => names.push(name),
                None => tracing::debug!(tag_id = id, "tag id has no name"),
            }
        }
        Ok(names)
    }

    /// Tags attached to questions in `root` (and its subcategories when asked)
    pub fn tags_in_category(
        &self,
        root: CategoryId,
        include_subcategories: bool,
    ) -> Result<Vec<Tag>> {
        let categories = CategoryExpander::new(self.categories).expand(root, include_subcategories)?;
        self.tags.tags_used_in(&categories)
    }
}
