//! Candidate pool construction
//!
//! A question belongs to a selector's pool when it sits in one of the
//! effective categories, its kind is not forbidden, it is top-level and
//! visible, and its tags pass the include/exclude predicate.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::bank::{CategoryStore, QuestionStore};
use crate::category::CategoryExpander;
use crate::error::Result;
use crate::kinds::KindFilter;
use crate::model::{CandidateSet, CategoryId, IncludeMode, SelectorConfig, SelectorId, TagId};
use crate::trace_time;

/// Include/exclude tag test for one question
#[derive(Debug, Clone, Copy)]
pub struct TagPredicate<'a> {
    pub mode: IncludeMode,
    pub include: &'a BTreeSet<TagId>,
    pub exclude: &'a BTreeSet<TagId>,
}

impl<'a> TagPredicate<'a> {
    pub fn from_config(config: &'a SelectorConfig) -> Self {
        Self {
            mode: config.include_mode,
            include: &config.include_tags,
            exclude: &config.exclude_tags,
        }
    }

    /// True when neither set restricts anything
    pub fn is_unrestricted(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Check a question's tags against inclusion, then exclusion
    pub fn matches(&self, question_tags: &BTreeSet<TagId>) -> bool {
        self.matches_include(question_tags) && self.matches_exclude(question_tags)
    }

    fn matches_include(&self, question_tags: &BTreeSet<TagId>) -> bool {
        if self.include.is_empty() {
            return true;
        }
        let hits = question_tags.intersection(self.include).count();
        match self.mode {
            IncludeMode::Any => hits > 0,
            IncludeMode::All => hits == self.include.len(),
        }
    }

    fn matches_exclude(&self, question_tags: &BTreeSet<TagId>) -> bool {
        self.exclude.is_empty() || question_tags.is_disjoint(self.exclude)
    }
}

/// Everything a pool query filters on, in one place
#[derive(Debug, Clone)]
pub struct PoolFilter<'a> {
    pub categories: BTreeSet<CategoryId>,
    pub excluded_kinds: &'a BTreeSet<String>,
    pub tags: TagPredicate<'a>,
    pub exclude_id: Option<SelectorId>,
}

/// Builds the candidate set for a selector config
pub struct CandidatePoolBuilder<'a> {
    questions: &'a dyn QuestionStore,
    categories: &'a dyn CategoryStore,
    kinds: &'a KindFilter,
}

impl<'a> CandidatePoolBuilder<'a> {
    pub fn new(
        questions: &'a dyn QuestionStore,
        categories: &'a dyn CategoryStore,
        kinds: &'a KindFilter,
    ) -> Self {
        Self {
            questions,
            categories,
            kinds,
        }
    }

    /// Describe the query for `config` without running it
    pub fn filter_for<'c>(
        &self,
        config: &'c SelectorConfig,
        self_id: Option<SelectorId>,
    ) -> Result<PoolFilter<'c>>
    where
        'a: 'c,
    {
        let categories = CategoryExpander::new(self.categories)
            .expand(config.category_id, config.include_subcategories)?;
        Ok(PoolFilter {
            categories,
            excluded_kinds: self.kinds.forbidden_kinds(),
            tags: TagPredicate::from_config(config),
            exclude_id: self_id,
        })
    }

    /// Question ids `config` may select from. `self_id` never ends up in the pool.
    pub fn build(
        &self,
        config: &SelectorConfig,
        self_id: Option<SelectorId>,
    ) -> Result<CandidateSet> {
        let start = Instant::now();
        let filter = self.filter_for(config, self_id)?;
        tracing::debug!(
            categories = ?filter.categories,
            excluded_kinds = ?filter.excluded_kinds,
            mode = %filter.tags.mode,
            include = ?filter.tags.include,
            exclude = ?filter.tags.exclude,
            "building candidate pool"
        );

        let records = self
            .questions
            .questions_in(&filter.categories, filter.excluded_kinds)?;

        let mut pool = CandidateSet::new();
        for record in records {
            if !record.is_selectable() || filter.exclude_id == Some(record.id) {
                continue;
            }
            if !filter.categories.contains(&record.category_id)
                || filter.excluded_kinds.contains(&record.kind)
            {
                continue;
            }
            if !filter.tags.is_unrestricted() {
                let tags = self.questions.tags_of(record.id)?;
                if !filter.tags.matches(&tags) {
                    continue;
                }
            }
            pool.insert(record.id);
        }

        trace_time!(start, "build_pool", size = pool.len());
        tracing::debug!(size = pool.len(), "candidate pool built");
        Ok(pool)
    }
}
