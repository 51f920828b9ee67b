//! The selector facade callers use
//!
//! Wires the pool builder, selection engine, grading heuristic and import
//! remapper to one question bank and one kind filter.

use std::collections::BTreeSet;

use rand::Rng;

use crate::bank::{CategoryStore, QuestionStore, SelectorStore, TagStore};
use crate::error::{Result, TagdrawError};
use crate::grading::ManualGradingHeuristic;
use crate::import::{IdMapping, ImportRemapper, ImportedSelector, SelectorRecord};
use crate::kinds::KindFilter;
use crate::model::{CandidateSet, QuestionId, SelectorConfig, SelectorId};
use crate::pool::CandidatePoolBuilder;
use crate::select::SelectionEngine;

/// Everything the selector needs from storage
pub trait QuestionBank: QuestionStore + CategoryStore + TagStore + SelectorStore {}

impl<T: QuestionStore + CategoryStore + TagStore + SelectorStore> QuestionBank for T {}

/// Tag-filtered random selection over one question bank
pub struct Selector<'a, B: QuestionBank> {
    bank: &'a B,
    kinds: &'a KindFilter,
    engine: SelectionEngine,
}

impl<'a, B: QuestionBank> Selector<'a, B> {
    pub fn new(bank: &'a B, kinds: &'a KindFilter) -> Self {
        Self {
            bank,
            kinds,
            engine: SelectionEngine::new(),
        }
    }

    pub fn kinds(&self) -> &KindFilter {
        self.kinds
    }

    /// Candidate pool for `config`; `self_id` (the selector's own question) is left out
    pub fn build_pool(
        &self,
        config: &SelectorConfig,
        self_id: Option<SelectorId>,
    ) -> Result<CandidateSet> {
        CandidatePoolBuilder::new(self.bank, self.bank, self.kinds).build(config, self_id)
    }

    /// Candidate pool of a saved selector
    pub fn build_pool_for(&self, selector_id: SelectorId) -> Result<CandidateSet> {
        let config = self.load(selector_id)?;
        self.build_pool(&config, Some(selector_id))
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        pool: &CandidateSet,
        excluded: &BTreeSet<QuestionId>,
        forced: Option<QuestionId>,
        rng: &mut R,
    ) -> Result<Option<QuestionId>> {
        self.engine.select(pool, excluded, forced, rng)
    }

    /// Build the pool of a saved selector and draw one question from it
    pub fn pick<R: Rng + ?Sized>(
        &self,
        selector_id: SelectorId,
        excluded: &BTreeSet<QuestionId>,
        forced: Option<QuestionId>,
        rng: &mut R,
    ) -> Result<Option<QuestionId>> {
        let pool = self.build_pool_for(selector_id)?;
        self.select(&pool, excluded, forced, rng)
    }

    pub fn may_require_manual_grading(
        &self,
        config: &SelectorConfig,
        already_in_use: &BTreeSet<QuestionId>,
    ) -> Result<bool> {
        ManualGradingHeuristic::new(self.bank, self.bank, self.kinds)
            .may_require_manual_grading(config, already_in_use)
    }

    /// Remap an exported selector into local ids and persist it.
    ///
    /// The returned associations are the rows as stored, with their new ids.
    pub fn import_selector(
        &self,
        record: &SelectorRecord,
        mapping: &mut IdMapping,
    ) -> Result<ImportedSelector> {
        let mut imported = ImportRemapper::new(self.bank).import_selector(record, mapping)?;
        imported.associations = self
            .bank
            .save_selector(imported.selector_id, &imported.config)?;
        Ok(imported)
    }

    /// Post-import fix-up for every selector question created by the job
    pub fn finish_import(&self, mapping: &IdMapping) -> Result<usize> {
        ImportRemapper::finalize(self.bank, mapping)
    }

    fn load(&self, selector_id: SelectorId) -> Result<SelectorConfig> {
        self.bank
            .load_selector(selector_id)?
            .ok_or(TagdrawError::SelectorNotFound { id: selector_id })
    }
}
