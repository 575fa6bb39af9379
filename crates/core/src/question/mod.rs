//! Question entity and per-type answer validation.
//!
//! All four question types share one flat set of nullable answer fields
//! ([`AnswerFields`]) so they persist as a single row shape. A
//! [`QuestionVariant`] is the validated view of that superset: building one
//! rejects missing required fields and any field that belongs to another
//! question type.

pub mod merge;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_QUESTION_TEXT_LENGTH: usize = 1;
pub const MAX_QUESTION_TEXT_LENGTH: usize = 500;

pub const MIN_SINGLE_CHOICE_OPTIONS: usize = 2;
pub const MIN_MULTI_CHOICE_OPTIONS: usize = 3;
pub const MIN_MULTI_CHOICE_CORRECT_ANSWERS: usize = 2;

/// Question type strings (stored in DB and used on the wire).
pub const TYPE_TEXT: &str = "text";
pub const TYPE_YES_NO: &str = "yes_no";
pub const TYPE_SINGLE_CHOICE: &str = "single_choice";
pub const TYPE_MULTI_CHOICE: &str = "multi_choice";

pub const VALID_QUESTION_TYPES: &[&str] = &[
    TYPE_TEXT,
    TYPE_YES_NO,
    TYPE_SINGLE_CHOICE,
    TYPE_MULTI_CHOICE,
];

// ---------------------------------------------------------------------------
// Question type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    YesNo,
    SingleChoice,
    MultiChoice,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => TYPE_TEXT,
            Self::YesNo => TYPE_YES_NO,
            Self::SingleChoice => TYPE_SINGLE_CHOICE,
            Self::MultiChoice => TYPE_MULTI_CHOICE,
        }
    }

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_TEXT => Ok(Self::Text),
            TYPE_YES_NO => Ok(Self::YesNo),
            TYPE_SINGLE_CHOICE => Ok(Self::SingleChoice),
            TYPE_MULTI_CHOICE => Ok(Self::MultiChoice),
            _ => Err(format!(
                "Invalid question type '{s}'. Must be one of: {}",
                VALID_QUESTION_TYPES.join(", ")
            )),
        }
    }

    /// Which answer fields this type must and may populate.
    pub fn field_rules(self) -> &'static FieldRules {
        match self {
            Self::Text => &TEXT_RULES,
            Self::YesNo => &YES_NO_RULES,
            Self::SingleChoice => &SINGLE_CHOICE_RULES,
            Self::MultiChoice => &MULTI_CHOICE_RULES,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Type-specific fields and their per-type rules
// ---------------------------------------------------------------------------

/// One of the nullable, type-specific answer columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    Options,
    CorrectText,
    CorrectBoolean,
    CorrectOptionIndex,
    CorrectOptionIndices,
    FollowingQuestionId,
}

impl QuestionField {
    pub const ALL: [QuestionField; 6] = [
        Self::Options,
        Self::CorrectText,
        Self::CorrectBoolean,
        Self::CorrectOptionIndex,
        Self::CorrectOptionIndices,
        Self::FollowingQuestionId,
    ];

    /// Column / JSON name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::CorrectText => "correct_text",
            Self::CorrectBoolean => "correct_boolean",
            Self::CorrectOptionIndex => "correct_option_index",
            Self::CorrectOptionIndices => "correct_option_indices",
            Self::FollowingQuestionId => "following_question_id",
        }
    }
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub struct FieldRules {
    pub required: &'static [QuestionField],
    pub optional: &'static [QuestionField],
}

impl FieldRules {
    pub fn allows(&self, field: QuestionField) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }
}

static TEXT_RULES: FieldRules = FieldRules {
    required: &[QuestionField::CorrectText],
    optional: &[],
};

static YES_NO_RULES: FieldRules = FieldRules {
    required: &[QuestionField::CorrectBoolean],
    optional: &[QuestionField::FollowingQuestionId],
};

static SINGLE_CHOICE_RULES: FieldRules = FieldRules {
    required: &[QuestionField::Options, QuestionField::CorrectOptionIndex],
    optional: &[],
};

static MULTI_CHOICE_RULES: FieldRules = FieldRules {
    required: &[QuestionField::Options, QuestionField::CorrectOptionIndices],
    optional: &[],
};

/// The flat superset of every type's answer fields. `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerFields {
    pub options: Option<Vec<String>>,
    pub correct_text: Option<String>,
    pub correct_boolean: Option<bool>,
    pub correct_option_index: Option<i32>,
    pub correct_option_indices: Option<Vec<i32>>,
    pub following_question_id: Option<DbId>,
}

impl AnswerFields {
    pub fn is_set(&self, field: QuestionField) -> bool {
        match field {
            QuestionField::Options => self.options.is_some(),
            QuestionField::CorrectText => self.correct_text.is_some(),
            QuestionField::CorrectBoolean => self.correct_boolean.is_some(),
            QuestionField::CorrectOptionIndex => self.correct_option_index.is_some(),
            QuestionField::CorrectOptionIndices => self.correct_option_indices.is_some(),
            QuestionField::FollowingQuestionId => self.following_question_id.is_some(),
        }
    }

    /// Every populated field, regardless of which type it belongs to.
    pub fn populated(&self) -> Vec<QuestionField> {
        QuestionField::ALL
            .into_iter()
            .filter(|f| self.is_set(*f))
            .collect()
    }

    /// Per field, keep `self`'s value and fall back to `existing` where unset.
    pub fn or_existing(self, existing: AnswerFields) -> Self {
        Self {
            options: self.options.or(existing.options),
            correct_text: self.correct_text.or(existing.correct_text),
            correct_boolean: self.correct_boolean.or(existing.correct_boolean),
            correct_option_index: self.correct_option_index.or(existing.correct_option_index),
            correct_option_indices: self
                .correct_option_indices
                .or(existing.correct_option_indices),
            following_question_id: self
                .following_question_id
                .or(existing.following_question_id),
        }
    }

    /// Clear every field the given rules do not allow.
    pub fn retain_allowed(self, rules: &FieldRules) -> Self {
        fn keep<T>(value: Option<T>, field: QuestionField, rules: &FieldRules) -> Option<T> {
            value.filter(|_| rules.allows(field))
        }

        Self {
            options: keep(self.options, QuestionField::Options, rules),
            correct_text: keep(self.correct_text, QuestionField::CorrectText, rules),
            correct_boolean: keep(self.correct_boolean, QuestionField::CorrectBoolean, rules),
            correct_option_index: keep(
                self.correct_option_index,
                QuestionField::CorrectOptionIndex,
                rules,
            ),
            correct_option_indices: keep(
                self.correct_option_indices,
                QuestionField::CorrectOptionIndices,
                rules,
            ),
            following_question_id: keep(
                self.following_question_id,
                QuestionField::FollowingQuestionId,
                rules,
            ),
        }
    }
}

/// The complete field set of a question, as received on create and as
/// written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFields {
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(flatten)]
    pub answers: AnswerFields,
}

// ---------------------------------------------------------------------------
// Validated variant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionVariant {
    Text {
        correct_text: String,
    },
    YesNo {
        correct_boolean: bool,
        following_question_id: Option<DbId>,
    },
    SingleChoice {
        options: Vec<String>,
        correct_option_index: i32,
    },
    MultiChoice {
        options: Vec<String>,
        correct_option_indices: Vec<i32>,
    },
}

impl QuestionVariant {
    /// Validate `answers` against `question_type` and build the variant.
    ///
    /// Structural checks (option counts, index ranges, uniqueness) run
    /// first, then the field-set check for missing and foreign fields.
    pub fn from_fields(
        question_type: QuestionType,
        answers: AnswerFields,
    ) -> Result<Self, ValidationError> {
        check_structure(question_type, &answers)?;
        check_field_set(question_type, &answers)?;

        let missing = || ValidationError::MissingRequiredFields {
            question_type,
            fields: question_type.field_rules().required.to_vec(),
        };

        let variant = match question_type {
            QuestionType::Text => Self::Text {
                correct_text: answers.correct_text.ok_or_else(missing)?,
            },
            QuestionType::YesNo => Self::YesNo {
                correct_boolean: answers.correct_boolean.ok_or_else(missing)?,
                following_question_id: answers.following_question_id,
            },
            QuestionType::SingleChoice => Self::SingleChoice {
                options: answers.options.ok_or_else(missing)?,
                correct_option_index: answers.correct_option_index.ok_or_else(missing)?,
            },
            QuestionType::MultiChoice => Self::MultiChoice {
                options: answers.options.ok_or_else(missing)?,
                correct_option_indices: answers.correct_option_indices.ok_or_else(missing)?,
            },
        };
        Ok(variant)
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Text { .. } => QuestionType::Text,
            Self::YesNo { .. } => QuestionType::YesNo,
            Self::SingleChoice { .. } => QuestionType::SingleChoice,
            Self::MultiChoice { .. } => QuestionType::MultiChoice,
        }
    }

    /// Flatten back into the shared field superset.
    pub fn to_answers(&self) -> AnswerFields {
        match self.clone() {
            Self::Text { correct_text } => AnswerFields {
                correct_text: Some(correct_text),
                ..Default::default()
            },
            Self::YesNo {
                correct_boolean,
                following_question_id,
            } => AnswerFields {
                correct_boolean: Some(correct_boolean),
                following_question_id,
                ..Default::default()
            },
            Self::SingleChoice {
                options,
                correct_option_index,
            } => AnswerFields {
                options: Some(options),
                correct_option_index: Some(correct_option_index),
                ..Default::default()
            },
            Self::MultiChoice {
                options,
                correct_option_indices,
            } => AnswerFields {
                options: Some(options),
                correct_option_indices: Some(correct_option_indices),
                ..Default::default()
            },
        }
    }
}

fn check_structure(
    question_type: QuestionType,
    answers: &AnswerFields,
) -> Result<(), ValidationError> {
    match question_type {
        QuestionType::Text | QuestionType::YesNo => Ok(()),
        QuestionType::SingleChoice => {
            let options = check_option_count(
                question_type,
                answers.options.as_deref(),
                MIN_SINGLE_CHOICE_OPTIONS,
            )?;
            // An absent index is reported by the field-set check.
            if let Some(index) = answers.correct_option_index {
                check_index(QuestionField::CorrectOptionIndex, index, options.len())?;
            }
            Ok(())
        }
        QuestionType::MultiChoice => {
            let options = check_option_count(
                question_type,
                answers.options.as_deref(),
                MIN_MULTI_CHOICE_OPTIONS,
            )?;
            let indices = answers.correct_option_indices.as_deref().unwrap_or_default();
            if indices.len() < MIN_MULTI_CHOICE_CORRECT_ANSWERS {
                return Err(ValidationError::TooFewCorrectAnswers {
                    min: MIN_MULTI_CHOICE_CORRECT_ANSWERS,
                    actual: indices.len(),
                });
            }
            for &index in indices {
                check_index(QuestionField::CorrectOptionIndices, index, options.len())?;
            }
            let mut seen = HashSet::with_capacity(indices.len());
            if let Some(&index) = indices.iter().find(|i| !seen.insert(**i)) {
                return Err(ValidationError::DuplicateIndices { index });
            }
            Ok(())
        }
    }
}

fn check_option_count(
    question_type: QuestionType,
    options: Option<&[String]>,
    min: usize,
) -> Result<&[String], ValidationError> {
    let options = options.unwrap_or_default();
    if options.len() < min {
        return Err(ValidationError::TooFewOptions {
            question_type,
            min,
            actual: options.len(),
        });
    }
    Ok(options)
}

fn check_index(field: QuestionField, index: i32, options: usize) -> Result<(), ValidationError> {
    match usize::try_from(index) {
        Ok(i) if i < options => Ok(()),
        _ => Err(ValidationError::IndexOutOfRange {
            field,
            index,
            options,
        }),
    }
}

fn check_field_set(
    question_type: QuestionType,
    answers: &AnswerFields,
) -> Result<(), ValidationError> {
    let rules = question_type.field_rules();

    let missing: Vec<_> = rules
        .required
        .iter()
        .copied()
        .filter(|f| !answers.is_set(*f))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequiredFields {
            question_type,
            fields: missing,
        });
    }

    let foreign: Vec<_> = answers
        .populated()
        .into_iter()
        .filter(|f| !rules.allows(*f))
        .collect();
    if !foreign.is_empty() {
        return Err(ValidationError::ForeignFieldsPresent {
            question_type,
            fields: foreign,
        });
    }
    Ok(())
}

/// Validate question text length, counted in characters.
pub fn validate_question_text(text: &str) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if !(MIN_QUESTION_TEXT_LENGTH..=MAX_QUESTION_TEXT_LENGTH).contains(&length) {
        return Err(ValidationError::InvalidText { length });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A validated question. Text and answer data are only reachable through
/// [`Question::new`] and [`Question::update`], so an instance never holds
/// fields that do not belong to its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// `None` until the store assigns one.
    pub id: Option<DbId>,
    text: String,
    variant: QuestionVariant,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Question {
    pub fn new(id: Option<DbId>, fields: QuestionFields) -> Result<Self, ValidationError> {
        validate_question_text(&fields.question_text)?;
        let variant = QuestionVariant::from_fields(fields.question_type, fields.answers)?;
        Ok(Self {
            id,
            text: fields.question_text,
            variant,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn with_timestamps(mut self, created_at: Timestamp, updated_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variant(&self) -> &QuestionVariant {
        &self.variant
    }

    pub fn question_type(&self) -> QuestionType {
        self.variant.question_type()
    }

    pub fn fields(&self) -> QuestionFields {
        QuestionFields {
            question_text: self.text.clone(),
            question_type: self.question_type(),
            answers: self.variant.to_answers(),
        }
    }

    /// Replace text and answers with a new, fully validated field set.
    ///
    /// The candidate is validated in full before anything is assigned, so a
    /// failed update leaves `self` exactly as it was.
    pub fn update(&mut self, fields: QuestionFields) -> Result<(), ValidationError> {
        let candidate = Self::new(self.id, fields)?;
        self.text = candidate.text;
        self.variant = candidate.variant;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fields(question_type: QuestionType, answers: AnswerFields) -> QuestionFields {
        QuestionFields {
            question_text: "What is the capital of France?".to_string(),
            question_type,
            answers,
        }
    }

    fn text_answers() -> AnswerFields {
        AnswerFields {
            correct_text: Some("Paris".to_string()),
            ..Default::default()
        }
    }

    fn yes_no_answers() -> AnswerFields {
        AnswerFields {
            correct_boolean: Some(true),
            ..Default::default()
        }
    }

    fn options(n: usize) -> Option<Vec<String>> {
        Some((0..n).map(|i| format!("Option {i}")).collect())
    }

    fn single_choice_answers() -> AnswerFields {
        AnswerFields {
            options: options(4),
            correct_option_index: Some(1),
            ..Default::default()
        }
    }

    fn multi_choice_answers() -> AnswerFields {
        AnswerFields {
            options: options(5),
            correct_option_indices: Some(vec![0, 2, 4]),
            ..Default::default()
        }
    }

    // -- Valid construction ------------------------------------------------

    #[test]
    fn every_type_accepts_exactly_its_required_fields() {
        let cases = [
            (QuestionType::Text, text_answers()),
            (QuestionType::YesNo, yes_no_answers()),
            (QuestionType::SingleChoice, single_choice_answers()),
            (QuestionType::MultiChoice, multi_choice_answers()),
        ];
        for (question_type, answers) in cases {
            let question = Question::new(None, fields(question_type, answers.clone()))
                .unwrap_or_else(|e| panic!("{question_type} should be valid: {e}"));
            assert_eq!(question.question_type(), question_type);
            assert_eq!(question.variant().to_answers(), answers);
            assert!(question.id.is_none());
        }
    }

    #[test]
    fn yes_no_accepts_optional_following_question() {
        let answers = AnswerFields {
            following_question_id: Some(5),
            ..yes_no_answers()
        };
        let question = Question::new(None, fields(QuestionType::YesNo, answers)).unwrap();
        assert_eq!(
            question.variant(),
            &QuestionVariant::YesNo {
                correct_boolean: true,
                following_question_id: Some(5),
            }
        );
    }

    #[test]
    fn false_and_empty_values_count_as_populated() {
        let answers = AnswerFields {
            correct_boolean: Some(false),
            ..Default::default()
        };
        assert!(Question::new(None, fields(QuestionType::YesNo, answers)).is_ok());

        let answers = AnswerFields {
            correct_text: Some(String::new()),
            ..Default::default()
        };
        assert!(Question::new(None, fields(QuestionType::Text, answers)).is_ok());
    }

    // -- Text --------------------------------------------------------------

    #[test]
    fn empty_text_is_rejected() {
        let mut f = fields(QuestionType::Text, text_answers());
        f.question_text = String::new();
        assert_matches!(
            Question::new(None, f),
            Err(ValidationError::InvalidText { length: 0 })
        );
    }

    #[test]
    fn text_length_boundaries() {
        let mut f = fields(QuestionType::Text, text_answers());
        f.question_text = "a".repeat(MAX_QUESTION_TEXT_LENGTH);
        assert!(Question::new(None, f.clone()).is_ok());

        f.question_text = "a".repeat(MAX_QUESTION_TEXT_LENGTH + 1);
        assert_matches!(
            Question::new(None, f),
            Err(ValidationError::InvalidText { length: 501 })
        );
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        let mut f = fields(QuestionType::Text, text_answers());
        f.question_text = "é".repeat(MAX_QUESTION_TEXT_LENGTH);
        assert!(Question::new(None, f).is_ok());
    }

    #[test]
    fn text_is_checked_before_answers() {
        let mut f = fields(QuestionType::SingleChoice, AnswerFields::default());
        f.question_text = String::new();
        assert_matches!(
            Question::new(None, f),
            Err(ValidationError::InvalidText { .. })
        );
    }

    // -- Missing required fields -------------------------------------------

    #[test]
    fn text_without_correct_text_is_missing_fields() {
        assert_matches!(
            Question::new(None, fields(QuestionType::Text, AnswerFields::default())),
            Err(ValidationError::MissingRequiredFields { question_type: QuestionType::Text, fields })
                if fields == vec![QuestionField::CorrectText]
        );
    }

    #[test]
    fn yes_no_without_correct_boolean_is_missing_fields() {
        let answers = AnswerFields {
            following_question_id: Some(3),
            ..Default::default()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::YesNo, answers)),
            Err(ValidationError::MissingRequiredFields { fields, .. })
                if fields == vec![QuestionField::CorrectBoolean]
        );
    }

    #[test]
    fn single_choice_without_index_is_missing_fields() {
        let answers = AnswerFields {
            correct_option_index: None,
            ..single_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::SingleChoice, answers)),
            Err(ValidationError::MissingRequiredFields { fields, .. })
                if fields == vec![QuestionField::CorrectOptionIndex]
        );
    }

    #[test]
    fn absent_options_report_too_few_options() {
        let answers = AnswerFields {
            options: None,
            ..single_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::SingleChoice, answers)),
            Err(ValidationError::TooFewOptions { actual: 0, min: 2, .. })
        );

        let answers = AnswerFields {
            options: None,
            ..multi_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::MultiChoice, answers)),
            Err(ValidationError::TooFewOptions { actual: 0, min: 3, .. })
        );
    }

    #[test]
    fn multi_choice_without_indices_reports_too_few_correct_answers() {
        let answers = AnswerFields {
            correct_option_indices: None,
            ..multi_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::MultiChoice, answers)),
            Err(ValidationError::TooFewCorrectAnswers { actual: 0, min: 2 })
        );
    }

    // -- Foreign fields ----------------------------------------------------

    #[test]
    fn text_with_boolean_is_foreign() {
        let answers = AnswerFields {
            correct_boolean: Some(true),
            ..text_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::Text, answers)),
            Err(ValidationError::ForeignFieldsPresent { question_type: QuestionType::Text, fields })
                if fields == vec![QuestionField::CorrectBoolean]
        );
    }

    #[test]
    fn following_question_is_foreign_outside_yes_no() {
        let answers = AnswerFields {
            following_question_id: Some(1),
            ..text_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::Text, answers)),
            Err(ValidationError::ForeignFieldsPresent { .. })
        );
    }

    #[test]
    fn single_choice_with_multi_indices_is_foreign() {
        let answers = AnswerFields {
            correct_option_indices: Some(vec![0, 1]),
            ..single_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::SingleChoice, answers)),
            Err(ValidationError::ForeignFieldsPresent { fields, .. })
                if fields == vec![QuestionField::CorrectOptionIndices]
        );
    }

    #[test]
    fn yes_no_with_options_lists_all_foreign_fields() {
        let answers = AnswerFields {
            options: options(2),
            correct_text: Some("x".to_string()),
            ..yes_no_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::YesNo, answers)),
            Err(ValidationError::ForeignFieldsPresent { fields, .. })
                if fields == vec![QuestionField::Options, QuestionField::CorrectText]
        );
    }

    #[test]
    fn missing_is_reported_before_foreign() {
        let answers = AnswerFields {
            correct_boolean: Some(true),
            ..Default::default()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::Text, answers)),
            Err(ValidationError::MissingRequiredFields { .. })
        );
    }

    // -- Single choice structure -------------------------------------------

    #[test]
    fn single_choice_with_one_option_is_too_few() {
        let answers = AnswerFields {
            options: Some(vec!["a".to_string()]),
            correct_option_index: Some(0),
            ..Default::default()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::SingleChoice, answers)),
            Err(ValidationError::TooFewOptions {
                question_type: QuestionType::SingleChoice,
                min: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn single_choice_index_out_of_range() {
        let answers = AnswerFields {
            options: options(2),
            correct_option_index: Some(5),
            ..Default::default()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::SingleChoice, answers)),
            Err(ValidationError::IndexOutOfRange {
                field: QuestionField::CorrectOptionIndex,
                index: 5,
                options: 2,
            })
        );
    }

    #[test]
    fn single_choice_negative_index_is_out_of_range() {
        let answers = AnswerFields {
            correct_option_index: Some(-1),
            ..single_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::SingleChoice, answers)),
            Err(ValidationError::IndexOutOfRange { index: -1, .. })
        );
    }

    #[test]
    fn single_choice_last_index_is_in_range() {
        let answers = AnswerFields {
            options: options(2),
            correct_option_index: Some(1),
            ..Default::default()
        };
        assert!(Question::new(None, fields(QuestionType::SingleChoice, answers)).is_ok());
    }

    // -- Multi choice structure --------------------------------------------

    #[test]
    fn multi_choice_with_two_options_is_too_few() {
        let answers = AnswerFields {
            options: options(2),
            correct_option_indices: Some(vec![0, 1]),
            ..Default::default()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::MultiChoice, answers)),
            Err(ValidationError::TooFewOptions {
                question_type: QuestionType::MultiChoice,
                min: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn multi_choice_with_one_correct_answer_is_too_few() {
        let answers = AnswerFields {
            correct_option_indices: Some(vec![2]),
            ..multi_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::MultiChoice, answers)),
            Err(ValidationError::TooFewCorrectAnswers { min: 2, actual: 1 })
        );
    }

    #[test]
    fn multi_choice_duplicate_indices() {
        let answers = AnswerFields {
            correct_option_indices: Some(vec![1, 1]),
            ..multi_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::MultiChoice, answers)),
            Err(ValidationError::DuplicateIndices { index: 1 })
        );
    }

    #[test]
    fn multi_choice_range_is_checked_before_uniqueness() {
        let answers = AnswerFields {
            correct_option_indices: Some(vec![9, 9]),
            ..multi_choice_answers()
        };
        assert_matches!(
            Question::new(None, fields(QuestionType::MultiChoice, answers)),
            Err(ValidationError::IndexOutOfRange {
                field: QuestionField::CorrectOptionIndices,
                index: 9,
                options: 5,
            })
        );
    }

    // -- Update ------------------------------------------------------------

    #[test]
    fn update_replaces_text_and_variant() {
        let mut question = Question::new(Some(7), fields(QuestionType::Text, text_answers())).unwrap();
        let mut next = fields(QuestionType::YesNo, yes_no_answers());
        next.question_text = "Is the sky blue?".to_string();

        question.update(next.clone()).unwrap();

        assert_eq!(question.id, Some(7));
        assert_eq!(question.fields(), next);
    }

    #[test]
    fn failed_update_leaves_question_untouched() {
        let mut question =
            Question::new(Some(7), fields(QuestionType::SingleChoice, single_choice_answers()))
                .unwrap();
        let before = question.clone();

        let mut bad = fields(
            QuestionType::SingleChoice,
            AnswerFields {
                correct_option_index: Some(10),
                ..single_choice_answers()
            },
        );
        bad.question_text = "Changed".to_string();

        assert_matches!(
            question.update(bad),
            Err(ValidationError::IndexOutOfRange { .. })
        );
        assert_eq!(question, before);
    }

    // -- Type parsing ------------------------------------------------------

    #[test]
    fn question_type_round_trips_through_db_strings() {
        for s in VALID_QUESTION_TYPES {
            let parsed = QuestionType::from_str_value(s).unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
        assert!(QuestionType::from_str_value("essay")
            .unwrap_err()
            .contains("Invalid question type"));
    }

    #[test]
    fn question_fields_deserialize_from_flat_json() {
        let parsed: QuestionFields = serde_json::from_value(serde_json::json!({
            "question_text": "What is 2 + 2?",
            "question_type": "single_choice",
            "options": ["3", "4"],
            "correct_option_index": 1
        }))
        .unwrap();
        assert_eq!(parsed.question_type, QuestionType::SingleChoice);
        assert_eq!(parsed.answers.correct_option_index, Some(1));
        assert_eq!(parsed.answers.correct_text, None);
    }
}
