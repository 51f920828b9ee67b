//! Category expansion

use std::collections::BTreeSet;

use crate::bank::CategoryStore;
use crate::error::Result;
use crate::model::CategoryId;

/// Expands a root category into the set of categories a selector covers
pub struct CategoryExpander<'a> {
    categories: &'a dyn CategoryStore,
}

impl<'a> CategoryExpander<'a> {
    pub fn new(categories: &'a dyn CategoryStore) -> Self {
        Self { categories }
    }

    /// `{root}` alone, or `{root}` plus every descendant when `include_subcategories`
    pub fn expand(
        &self,
        root: CategoryId,
        include_subcategories: bool,
    ) -> Result<BTreeSet<CategoryId>> {
        let mut effective = BTreeSet::from([root]);
        if include_subcategories {
            effective.extend(self.categories.descendants(root)?);
        }
        Ok(effective)
    }
}
