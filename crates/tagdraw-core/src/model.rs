//! Data model shared by pool building, selection and import

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagdrawError;

pub type QuestionId = i64;
pub type CategoryId = i64;
pub type TagId = i64;
/// A selector is owned by (and identified with) its selector question row.
pub type SelectorId = QuestionId;

/// Selector question text when subcategories are included
pub const PLACEHOLDER_SUBCATEGORIES: &str = "1";
/// Selector question text when they are not; also the canonical value for blank text
pub const PLACEHOLDER_NO_SUBCATEGORIES: &str = "0";

/// Placeholder text stored on a selector question
pub fn subcategory_placeholder(include_subcategories: bool) -> &'static str {
    if include_subcategories {
        PLACEHOLDER_SUBCATEGORIES
    } else {
        PLACEHOLDER_NO_SUBCATEGORIES
    }
}

/// How the include tag-set is matched against a question's tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeMode {
    /// At least one include tag must be present
    #[default]
    Any,
    /// Every include tag must be present
    All,
}

impl IncludeMode {
    /// Persisted integer code (1 = any, 2 = all)
    pub fn code(self) -> i64 {
        match self {
            IncludeMode::Any => 1,
            IncludeMode::All => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, TagdrawError> {
        match code {
            1 => Ok(IncludeMode::Any),
            2 => Ok(IncludeMode::All),
            other => Err(TagdrawError::invalid_value("include mode code", other)),
        }
    }
}

impl FromStr for IncludeMode {
    type Err = TagdrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(IncludeMode::Any),
            "all" => Ok(IncludeMode::All),
            other => Err(TagdrawError::invalid_value(
                "include mode (expected: any or all)",
                other,
            )),
        }
    }
}

impl fmt::Display for IncludeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeMode::Any => write!(f, "any"),
            IncludeMode::All => write!(f, "all"),
        }
    }
}

/// Saved configuration describing which questions a selector may draw from.
///
/// `include_tags` and `exclude_tags` may overlap; exclusion is applied after
/// inclusion, so an overlapping tag always removes the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub category_id: CategoryId,
    #[serde(default)]
    pub include_subcategories: bool,
    #[serde(default)]
    pub include_mode: IncludeMode,
    #[serde(default)]
    pub include_tags: BTreeSet<TagId>,
    #[serde(default)]
    pub exclude_tags: BTreeSet<TagId>,
}

impl SelectorConfig {
    /// A selector over a single category with no tag restrictions
    pub fn new(category_id: CategoryId) -> Self {
        Self {
            category_id,
            include_subcategories: false,
            include_mode: IncludeMode::Any,
            include_tags: BTreeSet::new(),
            exclude_tags: BTreeSet::new(),
        }
    }

    pub fn with_subcategories(mut self, include: bool) -> Self {
        self.include_subcategories = include;
        self
    }

    pub fn with_mode(mut self, mode: IncludeMode) -> Self {
        self.include_mode = mode;
        self
    }

    pub fn with_include_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.include_tags = tags.into_iter().collect();
        self
    }

    pub fn with_exclude_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.exclude_tags = tags.into_iter().collect();
        self
    }

    /// Tag association rows for this config, include rows first.
    /// Row ids are left at 0 until persisted.
    pub fn associations(&self, selector_id: SelectorId) -> Vec<TagAssociation> {
        let included = self.include_tags.iter().map(|&tag_id| (tag_id, true));
        let excluded = self.exclude_tags.iter().map(|&tag_id| (tag_id, false));
        included
            .chain(excluded)
            .map(|(tag_id, included)| TagAssociation {
                id: 0,
                selector_id,
                tag_id,
                included,
            })
            .collect()
    }

    /// Rebuild include/exclude sets from association rows.
    ///
    /// A tag listed both ways ends up in both sets, mirroring how it was saved.
    pub fn apply_associations<'a>(
        &mut self,
        rows: impl IntoIterator<Item = &'a TagAssociation>,
    ) {
        self.include_tags.clear();
        self.exclude_tags.clear();
        for row in rows {
            if row.included {
                self.include_tags.insert(row.tag_id);
            } else {
                self.exclude_tags.insert(row.tag_id);
            }
        }
    }
}

/// One include/exclude tag row owned by a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssociation {
    pub id: i64,
    pub selector_id: SelectorId,
    pub tag_id: TagId,
    pub included: bool,
}

/// Read-only view of a question as the selection core sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub category_id: CategoryId,
    pub kind: String,
    pub hidden: bool,
    pub parent_id: QuestionId,
}

impl QuestionRecord {
    /// Top-level and visible: the only questions a pool may contain
    pub fn is_selectable(&self) -> bool {
        self.parent_id == 0 && !self.hidden
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

/// Question ids satisfying a selector's filters for one selection call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateSet(BTreeSet<QuestionId>);

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: QuestionId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: QuestionId) -> bool {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<QuestionId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<QuestionId> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = QuestionId>>(iter: I) -> Self {
        CandidateSet(iter.into_iter().collect())
    }
}
