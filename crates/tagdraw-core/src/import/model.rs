//! Wire shapes of exported selector records
//!
//! Exports come in two historical shapes. Both are read through
//! [`RawSelectorRecord`] and turned into a [`SelectorRecord`] right away, so
//! comma-joined id lists never travel past [`SelectorRecord::parse`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{CategoryId, IncludeMode, QuestionId, TagId};

/// A tag referenced by a legacy record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTagRef {
    pub id: TagId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rawname: Option<String>,
}

impl LegacyTagRef {
    /// The name used as the cross-environment key, if any
    pub fn key(&self) -> Option<&str> {
        non_blank(self.name.as_deref()).or_else(|| non_blank(self.rawname.as_deref()))
    }
}

/// One association row of a normalized record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTagRow {
    pub tag_id: TagId,
    pub included: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl NormalizedTagRow {
    pub fn key(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }
}

/// Selector record exactly as it appears in an export, either shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSelectorRecord {
    pub question_id: QuestionId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub include_subcategories: Option<bool>,
    /// 1 = any, 2 = all
    #[serde(default)]
    pub include_mode: Option<i64>,

    // Legacy shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outtags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_tags: Option<Vec<LegacyTagRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_tags: Option<Vec<LegacyTagRef>>,

    // Normalized shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<NormalizedTagRow>>,
}

/// Fields common to both shapes, defaults resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorHeader {
    pub question_id: QuestionId,
    pub category_id: CategoryId,
    pub include_subcategories: bool,
    pub include_mode: IncludeMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySelector {
    pub header: SelectorHeader,
    pub include_tag_ids: Vec<TagId>,
    pub exclude_tag_ids: Vec<TagId>,
    /// Every tag the lists may reference, with its name
    pub tag_refs: Vec<LegacyTagRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSelector {
    pub header: SelectorHeader,
    pub rows: Vec<NormalizedTagRow>,
}

/// A parsed selector record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorRecord {
    Legacy(LegacySelector),
    Normalized(NormalizedSelector),
}

impl SelectorRecord {
    /// Detect the shape of `raw` and parse it.
    ///
    /// Any legacy field marks the record as legacy; otherwise it is normalized
    /// (a record with no tag data at all is a normalized record with no rows).
    pub fn parse(raw: RawSelectorRecord) -> Result<Self> {
        let header = SelectorHeader {
            question_id: raw.question_id,
            category_id: raw.category_id,
            include_subcategories: raw.include_subcategories.unwrap_or(false),
            include_mode: match raw.include_mode {
                Some(code) => IncludeMode::from_code(code)?,
                None => IncludeMode::Any,
            },
        };

        let is_legacy = raw.intags.is_some()
            || raw.outtags.is_some()
            || raw.used_tags.is_some()
            || raw.excluded_tags.is_some();

        if is_legacy {
            if raw.associations.is_some() {
                tracing::warn!(
                    question_id = raw.question_id,
                    "selector record has both legacy tag lists and associations; associations ignored"
                );
            }
            let mut tag_refs = raw.used_tags.unwrap_or_default();
            tag_refs.extend(raw.excluded_tags.unwrap_or_default());
            Ok(SelectorRecord::Legacy(LegacySelector {
                header,
                include_tag_ids: parse_id_list(raw.intags.as_deref().unwrap_or("")),
                exclude_tag_ids: parse_id_list(raw.outtags.as_deref().unwrap_or("")),
                tag_refs,
            }))
        } else {
            Ok(SelectorRecord::Normalized(NormalizedSelector {
                header,
                rows: raw.associations.unwrap_or_default(),
            }))
        }
    }

    /// Parse from a JSON value
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let raw: RawSelectorRecord = serde_json::from_value(value)?;
        Self::parse(raw)
    }

    pub fn header(&self) -> &SelectorHeader {
        match self {
            SelectorRecord::Legacy(legacy) => &legacy.header,
            SelectorRecord::Normalized(normalized) => &normalized.header,
        }
    }
}

/// Parse a comma-joined id list; blank and non-numeric entries are dropped
pub fn parse_id_list(list: &str) -> Vec<TagId> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<TagId>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(entry = part, "skipping malformed tag id in legacy list");
                None
            }
        })
        .collect()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_id_list_tolerates_junk() {
        assert_eq!(parse_id_list("3, 5,,x,7 "), vec![3, 5, 7]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn test_detects_legacy_shape() {
        let record = SelectorRecord::from_json(json!({
            "question_id": 500,
            "category_id": 10,
            "include_mode": 2,
            "intags": "3,4",
            "outtags": "",
            "used_tags": [{"id": 3, "name": "easy"}, {"id": 4, "name": "algebra"}],
        }))
        .unwrap();

        match record {
            SelectorRecord::Legacy(legacy) => {
                assert_eq!(legacy.header.include_mode, IncludeMode::All);
                assert!(!legacy.header.include_subcategories);
                assert_eq!(legacy.include_tag_ids, vec![3, 4]);
                assert!(legacy.exclude_tag_ids.is_empty());
                assert_eq!(legacy.tag_refs.len(), 2);
            }
            other => panic!("expected legacy record, got {:?}", other),
        }
    }

    #[test]
    fn test_detects_normalized_shape() {
        let record = SelectorRecord::from_json(json!({
            "question_id": 500,
            "category_id": 10,
            "include_subcategories": true,
            "associations": [
                {"tag_id": 3, "included": true, "name": "easy"},
                {"tag_id": 9, "included": false, "name": "hard"}
            ],
        }))
        .unwrap();

        match record {
            SelectorRecord::Normalized(normalized) => {
                assert!(normalized.header.include_subcategories);
                assert_eq!(normalized.header.include_mode, IncludeMode::Any);
                assert_eq!(normalized.rows.len(), 2);
            }
            other => panic!("expected normalized record, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_fields_take_precedence_over_associations() {
        let record = SelectorRecord::from_json(json!({
            "question_id": 500,
            "category_id": 10,
            "intags": "3",
            "used_tags": [{"id": 3, "name": "easy"}],
            "associations": [{"tag_id": 9, "included": false, "name": "hard"}],
        }))
        .unwrap();

        match record {
            SelectorRecord::Legacy(legacy) => {
                assert_eq!(legacy.include_tag_ids, vec![3]);
                assert!(legacy.exclude_tag_ids.is_empty());
                assert_eq!(legacy.tag_refs.len(), 1);
            }
            other => panic!("expected legacy record, got {:?}", other),
        }
    }

    #[test]
    fn test_record_without_tags_is_normalized() {
        let record = SelectorRecord::from_json(json!({
            "question_id": 1,
            "category_id": 2,
        }))
        .unwrap();
        assert!(matches!(record, SelectorRecord::Normalized(ref n) if n.rows.is_empty()));
    }

    #[test]
    fn test_unknown_include_mode_rejected() {
        let result = SelectorRecord::from_json(json!({
            "question_id": 1,
            "category_id": 2,
            "include_mode": 7,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_tag_ref_key_falls_back_to_rawname() {
        let tag = LegacyTagRef {
            id: 1,
            name: Some("  ".to_string()),
            rawname: Some("Algebra".to_string()),
        };
        assert_eq!(tag.key(), Some("Algebra"));

        let unnamed = LegacyTagRef {
            id: 2,
            name: None,
            rawname: None,
        };
        assert_eq!(unnamed.key(), None);
    }
}
