//! Manual grading estimate for selectors

use std::collections::BTreeSet;

use crate::bank::{CategoryStore, QuestionStore};
use crate::error::Result;
use crate::kinds::KindFilter;
use crate::model::{QuestionId, SelectorConfig};
use crate::pool::CandidatePoolBuilder;

/// Answers whether a selector might hand out a manually graded question.
///
/// Tag filters are deliberately not applied: checking them would cost as much
/// as building the real pool. The answer is therefore an over-approximation
/// for tag-restricted selectors (a manual question that the tags would reject
/// still counts).
pub struct ManualGradingHeuristic<'a> {
    questions: &'a dyn QuestionStore,
    categories: &'a dyn CategoryStore,
    kinds: &'a KindFilter,
}

impl<'a> ManualGradingHeuristic<'a> {
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

    /// True if a visible top-level question of a manually graded kind exists in
    /// the selector's categories, ignoring ids already in use elsewhere.
    pub fn may_require_manual_grading(
        &self,
        config: &SelectorConfig,
        already_in_use: &BTreeSet<QuestionId>,
    ) -> Result<bool> {
        let manual = self.kinds.manual_kinds();
        if manual.is_empty() {
            return Ok(false);
        }

        let filter = CandidatePoolBuilder::new(self.questions, self.categories, self.kinds)
            .filter_for(config, None)?;
        let records = self
            .questions
            .questions_in(&filter.categories, filter.excluded_kinds)?;

        let found = records.iter().any(|record| {
            record.is_selectable()
                && !already_in_use.contains(&record.id)
                && manual.contains(&record.kind)
        });

        tracing::debug!(
            category_id = config.category_id,
            manual_kinds = ?manual,
            found,
            "manual grading check"
        );
        Ok(found)
    }
}
