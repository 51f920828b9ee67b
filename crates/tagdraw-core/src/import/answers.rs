use crate::error::{Result, TagdrawError};
use crate::import::{IdMapping, MappedEntity};
use crate::kinds::SELECTOR_KIND;
use crate::model::QuestionId;

/// Remap question ids inside a historic attempt answer.
///
/// Two shapes exist: `randomtag<qid>-<rest>`, where only `<qid>` is remapped
/// and `<rest>` is kept verbatim, and a bare question id.
pub fn recode_legacy_answer(answer: &str, mapping: &IdMapping) -> Result<String> {
    if let Some(tail) = answer.strip_prefix(SELECTOR_KIND) {
        if let Some((id, rest)) = tail.split_once('-') {
            if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
                let local = remap_question(id, mapping)?;
                return Ok(format!("{}{}-{}", SELECTOR_KIND, local, rest));
            }
        }
    }

    let local = remap_question(answer.trim(), mapping)?;
    Ok(local.to_string())
}

fn remap_question(id: &str, mapping: &IdMapping) -> Result<QuestionId> {
    let foreign: QuestionId = id
        .parse()
        .map_err(|_| TagdrawError::invalid_value("legacy answer", id))?;
    mapping.require(MappedEntity::Question, foreign)
}
