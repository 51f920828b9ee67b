//! Pack file model shared by `export` and `import`
//!
//! Ids inside a pack belong to the exporting store; import maps them.
//! Selector records are kept as raw JSON so both historic shapes load.

use serde::{Deserialize, Serialize};

use tagdraw_core::db::StoredQuestion;
use tagdraw_core::model::{Category, CategoryId, QuestionId};

/// Current pack format version
pub const PACK_VERSION: &str = "1";

#[derive(Debug, Serialize, Deserialize)]
pub struct Pack {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub categories: Vec<PackCategory>,
    #[serde(default)]
    pub questions: Vec<PackQuestion>,
    #[serde(default)]
    pub selectors: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

impl From<Category> for PackCategory {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            parent_id: category.parent_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackQuestion {
    pub id: QuestionId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub parent_id: QuestionId,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<StoredQuestion> for PackQuestion {
    fn from(q: StoredQuestion) -> Self {
        Self {
            id: q.id,
            category_id: q.category_id,
            name: q.name,
            kind: q.kind,
            text: q.text,
            hidden: q.hidden,
            parent_id: q.parent_id,
            tags: q.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_pack_parses_with_defaults() {
        let pack: Pack = serde_json::from_str(
            r#"{"version":"1","questions":[{"id":4,"category_id":1,"kind":"essay"}]}"#,
        )
        .unwrap();
        assert!(pack.categories.is_empty());
        assert!(pack.selectors.is_empty());
        assert_eq!(pack.questions[0].parent_id, 0);
        assert!(pack.questions[0].tags.is_empty());
    }
}
