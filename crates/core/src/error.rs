use crate::question::{QuestionField, QuestionType};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A write references rows that do not exist.
    #[error("{entity} with id {} does not exist", join_ids(.ids))]
    ReferentialIntegrity { entity: &'static str, ids: Vec<DbId> },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejections raised while constructing or updating a question or
/// questionnaire. Every variant maps to a client error at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Question text must be 1-500 characters, got {length}")]
    InvalidText { length: usize },

    #[error("{question_type} questions require at least {min} options, got {actual}")]
    TooFewOptions {
        question_type: QuestionType,
        min: usize,
        actual: usize,
    },

    #[error("{field} {index} out of range for {options} options")]
    IndexOutOfRange {
        field: QuestionField,
        index: i32,
        options: usize,
    },

    #[error("multi_choice questions require at least {min} correct_option_indices, got {actual}")]
    TooFewCorrectAnswers { min: usize, actual: usize },

    #[error("correct_option_indices must be unique, {index} appears more than once")]
    DuplicateIndices { index: i32 },

    #[error("{question_type} questions require: {}", join_fields(.fields))]
    MissingRequiredFields {
        question_type: QuestionType,
        fields: Vec<QuestionField>,
    },

    #[error(
        "{question_type} questions cannot use: {}. These fields belong to other question types",
        join_fields(.fields)
    )]
    ForeignFieldsPresent {
        question_type: QuestionType,
        fields: Vec<QuestionField>,
    },

    #[error("Title must be 1-255 characters, got {length}")]
    InvalidTitle { length: usize },

    #[error("Description must not exceed 500 characters, got {length}")]
    InvalidDescription { length: usize },

    #[error("Duplicate question IDs are not allowed: {id}")]
    DuplicateQuestionIds { id: DbId },
}

impl ValidationError {
    /// Stable machine-readable code returned alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidText { .. } => "INVALID_TEXT",
            Self::TooFewOptions { .. } => "TOO_FEW_OPTIONS",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::TooFewCorrectAnswers { .. } => "TOO_FEW_CORRECT_ANSWERS",
            Self::DuplicateIndices { .. } => "DUPLICATE_INDICES",
            Self::MissingRequiredFields { .. } => "MISSING_REQUIRED_FIELDS",
            Self::ForeignFieldsPresent { .. } => "FOREIGN_FIELDS_PRESENT",
            Self::InvalidTitle { .. } => "INVALID_TITLE",
            Self::InvalidDescription { .. } => "INVALID_DESCRIPTION",
            Self::DuplicateQuestionIds { .. } => "DUPLICATE_QUESTION_IDS",
        }
    }
}

fn join_fields(fields: &[QuestionField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
