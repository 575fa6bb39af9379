//! Repository for the `questions` table.

use sqlx::PgPool;
use quizbank_core::question::QuestionFields;
use quizbank_core::types::DbId;

use crate::models::question::QuestionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_text, question_type, options, correct_text, \
    correct_boolean, correct_option_index, correct_option_indices, \
    following_question_id, created_at, updated_at";

/// Provides CRUD operations for questions.
///
/// Writes always take the complete field set; callers validate it through
/// `quizbank_core::question::Question` first.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &QuestionFields) -> Result<QuestionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (question_text, question_type, options, correct_text,
                 correct_boolean, correct_option_index, correct_option_indices,
                 following_question_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(&input.question_text)
            .bind(input.question_type.as_str())
            .bind(&input.answers.options)
            .bind(&input.answers.correct_text)
            .bind(input.answers.correct_boolean)
            .bind(input.answers.correct_option_index)
            .bind(&input.answers.correct_option_indices)
            .bind(input.answers.following_question_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all questions in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY id");
        sqlx::query_as::<_, QuestionRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column with `input` and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &QuestionFields,
    ) -> Result<Option<QuestionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET
                question_text = $2,
                question_type = $3,
                options = $4,
                correct_text = $5,
                correct_boolean = $6,
                correct_option_index = $7,
                correct_option_indices = $8,
                following_question_id = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .bind(&input.question_text)
            .bind(input.question_type.as_str())
            .bind(&input.answers.options)
            .bind(&input.answers.correct_text)
            .bind(input.answers.correct_boolean)
            .bind(input.answers.correct_option_index)
            .bind(&input.answers.correct_option_indices)
            .bind(input.answers.following_question_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a question. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while another question still
    /// points at it through `following_question_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Return the ids from `ids` that have no matching question, in the
    /// order they were given.
    pub async fn find_missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>(
            "SELECT requested.id
             FROM UNNEST($1::BIGINT[]) WITH ORDINALITY AS requested(id, position)
             WHERE NOT EXISTS (SELECT 1 FROM questions q WHERE q.id = requested.id)
             ORDER BY requested.position",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
