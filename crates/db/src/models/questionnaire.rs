//! Questionnaire row model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quizbank_core::types::{DbId, Timestamp};

/// A row from the `questionnaires` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Questionnaire {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Ordered question references.
    pub question_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a questionnaire.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionnaire {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub question_ids: Vec<DbId>,
}
