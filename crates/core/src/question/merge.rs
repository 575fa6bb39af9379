//! Merging a partial update request into an existing question.
//!
//! A same-type update keeps every existing value the caller did not supply.
//! A type-change update starts from scratch: only supplied values that the
//! new type allows survive, everything else is cleared.

use serde::Deserialize;

use super::{AnswerFields, Question, QuestionFields, QuestionType};
use crate::error::ValidationError;

/// A partial update. `None` means "not supplied", which is distinct from a
/// supplied empty string, `false` or empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionPatch {
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(flatten)]
    pub answers: AnswerFields,
}

/// True when the patch names a type different from the existing one.
///
/// Supplying the current type again is not a change.
pub fn is_type_change(existing: &Question, patch: &QuestionPatch) -> bool {
    patch
        .question_type
        .is_some_and(|t| t != existing.question_type())
}

/// Compute the full field set that should replace `existing`.
///
/// The result is not validated; see [`apply_update`].
pub fn merge_update(existing: &Question, patch: QuestionPatch) -> QuestionFields {
    let question_text = patch
        .question_text
        .unwrap_or_else(|| existing.text().to_string());

    match patch.question_type {
        Some(question_type) if question_type != existing.question_type() => QuestionFields {
            question_text,
            question_type,
            answers: patch.answers.retain_allowed(question_type.field_rules()),
        },
        _ => QuestionFields {
            question_text,
            question_type: existing.question_type(),
            answers: patch.answers.or_existing(existing.variant().to_answers()),
        },
    }
}

/// Merge `patch` into `existing` and validate the result.
///
/// Returns the updated question; `existing` is never modified, so on error
/// the caller still holds the prior state.
pub fn apply_update(existing: &Question, patch: QuestionPatch) -> Result<Question, ValidationError> {
    let merged = merge_update(existing, patch);
    let mut updated = existing.clone();
    updated.update(merged)?;
    Ok(updated)
}
