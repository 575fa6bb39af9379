//! Repository for the `questionnaires` table.

use sqlx::PgPool;
use quizbank_core::types::DbId;

use crate::models::questionnaire::{CreateQuestionnaire, Questionnaire};

const COLUMNS: &str = "id, title, description, question_ids, created_at, updated_at";

/// Provides create and read operations for questionnaires.
pub struct QuestionnaireRepo;

impl QuestionnaireRepo {
    /// Insert a new questionnaire, returning the created row.
    ///
    /// Runs inside a transaction; any failure drops it, rolling back the
    /// insert before the error is returned.
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuestionnaire,
    ) -> Result<Questionnaire, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO questionnaires (title, description, question_ids)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let questionnaire = sqlx::query_as::<_, Questionnaire>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.question_ids)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(questionnaire)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Questionnaire>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questionnaires WHERE id = $1");
        sqlx::query_as::<_, Questionnaire>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all questionnaires in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Questionnaire>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questionnaires ORDER BY id");
        sqlx::query_as::<_, Questionnaire>(&query)
            .fetch_all(pool)
            .await
    }
}
