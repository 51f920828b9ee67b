//! Selector import across environments
//!
//! Numeric ids are local to the environment that produced an export, so tags
//! are matched by name and questions/categories through the job's
//! [`IdMapping`]. Both wire shapes end up as the same [`TagAssociation`] rows.

mod answers;
pub mod mapping;
pub mod model;

use crate::bank::{SelectorStore, TagStore};
use crate::error::Result;
use crate::model::{
    SelectorConfig, SelectorId, TagAssociation, TagId, PLACEHOLDER_NO_SUBCATEGORIES,
};

pub use answers::recode_legacy_answer;
pub use mapping::{IdMapping, MappedEntity};
pub use model::{
    LegacySelector, LegacyTagRef, NormalizedSelector, NormalizedTagRow, RawSelectorRecord,
    SelectorHeader, SelectorRecord,
};

/// A selector translated into the local id space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSelector {
    pub selector_id: SelectorId,
    pub config: SelectorConfig,
    pub associations: Vec<TagAssociation>,
}

/// Translates exported selector records into local configs
pub struct ImportRemapper<'a> {
    tags: &'a dyn TagStore,
}

impl<'a> ImportRemapper<'a> {
    pub fn new(tags: &'a dyn TagStore) -> Self {
        Self { tags }
    }

    /// Remap one record. Tags are found or created by name; a tag without a
    /// usable name is dropped, not fatal. The owning question and category
    /// must already be in `mapping`.
    pub fn import_selector(
        &self,
        record: &SelectorRecord,
        mapping: &mut IdMapping,
    ) -> Result<ImportedSelector> {
        let header = record.header();
        let selector_id = mapping.require(MappedEntity::Question, header.question_id)?;
        let category_id = mapping.require(MappedEntity::Category, header.category_id)?;

        let mut config = SelectorConfig::new(category_id)
            .with_subcategories(header.include_subcategories)
            .with_mode(header.include_mode);

        let associations = match record {
            SelectorRecord::Legacy(legacy) => {
                for tag in &legacy.tag_refs {
                    self.local_tag(tag.id, tag.key(), mapping)?;
                }
                config.include_tags = substitute(&legacy.include_tag_ids, mapping);
                config.exclude_tags = substitute(&legacy.exclude_tag_ids, mapping);
                config.associations(selector_id)
            }
            SelectorRecord::Normalized(normalized) => {
                let mut rows = Vec::with_capacity(normalized.rows.len());
                for row in &normalized.rows {
                    if let Some(tag_id) = self.local_tag(row.tag_id, row.key(), mapping)? {
                        rows.push(TagAssociation {
                            id: 0,
                            selector_id,
                            tag_id,
                            included: row.included,
                        });
                    }
                }
                config.apply_associations(&rows);
                rows
            }
        };

        tracing::info!(
            foreign_id = header.question_id,
            selector_id,
            include = config.include_tags.len(),
            exclude = config.exclude_tags.len(),
            "selector remapped"
        );

        Ok(ImportedSelector {
            selector_id,
            config,
            associations,
        })
    }

    /// Local id for a foreign tag, creating the tag by name on first sight
    fn local_tag(
        &self,
        foreign_id: TagId,
        name: Option<&str>,
        mapping: &mut IdMapping,
    ) -> Result<Option<TagId>> {
        if let Some(local) = mapping.get(MappedEntity::Tag, foreign_id) {
            return Ok(Some(local));
        }
        let Some(name) = name else {
            tracing::warn!(foreign_tag_id = foreign_id, "tag has no name, skipping");
            return Ok(None);
        };
        let local = self.tags.find_or_create_tag_by_name(name)?;
        mapping.insert(MappedEntity::Tag, foreign_id, local);
        Ok(Some(local))
    }

    /// Post-import fix-up: selector questions created by this job with blank
    /// placeholder text get the canonical "no subcategories" marker.
    pub fn finalize(store: &dyn SelectorStore, mapping: &IdMapping) -> Result<usize> {
        let fixed =
            store.fill_blank_placeholders(mapping.created_questions(), PLACEHOLDER_NO_SUBCATEGORIES)?;
        if fixed > 0 {
            tracing::info!(fixed, "normalized blank selector placeholders");
        }
        Ok(fixed)
    }
}

/// Replace foreign ids by local ones; ids that never got a mapping drop out
fn substitute(
    foreign_ids: &[TagId],
    mapping: &IdMapping,
) -> std::collections::BTreeSet<TagId> {
    foreign_ids
        .iter()
        .filter_map(|&foreign| {
            let local = mapping.get(MappedEntity::Tag, foreign);
            if local.is_none() {
                tracing::warn!(foreign_tag_id = foreign, "tag id has no mapping, dropped");
            }
            local
        })
        .collect()
}
