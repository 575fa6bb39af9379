//! Question row model.

use serde::Serialize;
use sqlx::FromRow;
use quizbank_core::error::CoreError;
use quizbank_core::question::{AnswerFields, Question, QuestionFields, QuestionType};
use quizbank_core::types::{DbId, Timestamp};

/// A row from the `questions` table. Only the columns belonging to
/// `question_type` are non-null.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct QuestionRow {
    pub id: DbId,
    pub question_text: String,
    pub question_type: String,
    pub options: Option<Vec<String>>,
    pub correct_text: Option<String>,
    pub correct_boolean: Option<bool>,
    pub correct_option_index: Option<i32>,
    pub correct_option_indices: Option<Vec<i32>>,
    pub following_question_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl QuestionRow {
    /// Re-validate the stored row into a [`Question`] entity.
    ///
    /// A row that fails validation was written outside the application and
    /// is reported as an internal error.
    pub fn into_entity(self) -> Result<Question, CoreError> {
        let id = self.id;
        let question_type =
            QuestionType::from_str_value(&self.question_type).map_err(CoreError::Internal)?;

        let fields = QuestionFields {
            question_text: self.question_text,
            question_type,
            answers: AnswerFields {
                options: self.options,
                correct_text: self.correct_text,
                correct_boolean: self.correct_boolean,
                correct_option_index: self.correct_option_index,
                correct_option_indices: self.correct_option_indices,
                following_question_id: self.following_question_id,
            },
        };

        let question = Question::new(Some(id), fields).map_err(|e| {
            tracing::error!(question_id = id, error = %e, "Stored question failed validation");
            CoreError::Internal(format!("Stored question {id} is invalid: {e}"))
        })?;
        Ok(question.with_timestamps(self.created_at, self.updated_at))
    }
}
