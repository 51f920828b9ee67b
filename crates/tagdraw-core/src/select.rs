//! Random selection from a candidate pool

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, TagdrawError};
use crate::model::{CandidateSet, QuestionId};

/// Picks one question from a candidate pool.
///
/// Stateless; the random source is supplied per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionEngine;

impl SelectionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Shuffle `pool`, put `forced` first when given, and return the first id
    /// not in `excluded`.
    ///
    /// Returns `Ok(None)` when every candidate is excluded (or the pool is
    /// empty). A `forced` id outside the pool is a caller bug and fails with
    /// [`TagdrawError::ForcedIdNotSelectable`].
    pub fn select<R: Rng + ?Sized>(
        &self,
        pool: &CandidateSet,
        excluded: &BTreeSet<QuestionId>,
        forced: Option<QuestionId>,
        rng: &mut R,
    ) -> Result<Option<QuestionId>> {
        let order = self.order(pool, forced, rng)?;
        let chosen = order.into_iter().find(|id| !excluded.contains(id));

        match chosen {
            Some(id) => tracing::debug!(question_id = id, pool = pool.len(), "question selected"),
            None => tracing::debug!(
                pool = pool.len(),
                excluded = excluded.len(),
                "no selectable question left"
            ),
        }
        Ok(chosen)
    }

    /// The visiting order `select` walks: a uniform shuffle, with `forced` moved to the front
    pub fn order<R: Rng + ?Sized>(
        &self,
        pool: &CandidateSet,
        forced: Option<QuestionId>,
        rng: &mut R,
    ) -> Result<Vec<QuestionId>> {
        let mut available = pool.to_vec();
        available.shuffle(rng);

        if let Some(question_id) = forced {
            let position = available
                .iter()
                .position(|&id| id == question_id)
                .ok_or(TagdrawError::ForcedIdNotSelectable { question_id })?;
            available.remove(position);
            available.insert(0, question_id);
        }

        Ok(available)
    }
}
