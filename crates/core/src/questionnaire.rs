//! Questionnaire validation.
//!
//! A questionnaire is a title, an optional description and an ordered list
//! of question ids. It holds references only; whether the ids exist is
//! checked by the caller against the store.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::DbId;

pub const MIN_TITLE_LENGTH: usize = 1;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.chars().count();
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&length) {
        return Err(ValidationError::InvalidTitle { length });
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), ValidationError> {
    let length = description.map_or(0, |d| d.chars().count());
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::InvalidDescription { length });
    }
    Ok(())
}

/// Reject the first id that appears more than once. Order is not changed.
pub fn validate_question_ids(question_ids: &[DbId]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(question_ids.len());
    match question_ids.iter().find(|id| !seen.insert(**id)) {
        Some(&id) => Err(ValidationError::DuplicateQuestionIds { id }),
        None => Ok(()),
    }
}

/// Run every questionnaire check in order: title, description, ids.
pub fn validate_questionnaire(
    title: &str,
    description: Option<&str>,
    question_ids: &[DbId],
) -> Result<(), ValidationError> {
    validate_title(title)?;
    validate_description(description)?;
    validate_question_ids(question_ids)
}
