//! Handlers for the `/question` resource.
//!
//! Every write goes through `quizbank_core::question`: creates build a
//! validated `Question`, updates merge the request into the stored entity
//! and validate the result before anything is written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sqlx::PgPool;
use quizbank_core::error::CoreError;
use quizbank_core::question::merge::{self, QuestionPatch};
use quizbank_core::question::{Question, QuestionFields};
use quizbank_core::types::DbId;
use quizbank_db::models::question::QuestionRow;
use quizbank_db::repositories::QuestionRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /question/
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<QuestionFields>,
) -> AppResult<(StatusCode, Json<QuestionRow>)> {
    let question = Question::new(None, input)?;
    let fields = question.fields();
    ensure_questions_exist(&state.pool, fields.answers.following_question_id.as_slice()).await?;

    let row = QuestionRepo::create(&state.pool, &fields).await?;

    tracing::info!(
        question_id = row.id,
        question_type = %fields.question_type,
        "Question created",
    );

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /question/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<QuestionRow>>>> {
    let questions = QuestionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// GET /question/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<QuestionRow>> {
    let question = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(question))
}

/// PUT /question/{id}
///
/// Fields left out of the body keep their stored values, unless the body
/// changes `question_type`: then only fields of the new type that were
/// supplied are kept and all others are cleared. Nothing is written if the
/// merged question fails validation.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<QuestionPatch>,
) -> AppResult<Json<QuestionRow>> {
    let existing = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?
        .into_entity()?;

    let type_change = merge::is_type_change(&existing, &patch);
    let updated = merge::apply_update(&existing, patch)?;
    let fields = updated.fields();
    ensure_questions_exist(&state.pool, fields.answers.following_question_id.as_slice()).await?;

    let row = QuestionRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        question_id = id,
        question_type = %fields.question_type,
        type_change,
        "Question updated",
    );

    Ok(Json(row))
}

/// DELETE /question/{id}
///
/// A question that another question names as its follow-up cannot be
/// deleted until that reference is removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = QuestionRepo::delete(&state.pool, id)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::Core(CoreError::Conflict(format!(
                    "Question with id {id} is the follow-up of another question"
                )))
            }
            other => AppError::Database(other),
        })?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(question_id = id, "Question deleted");

    Ok(Json(serde_json::json!({
        "message": format!("Question with id: {id} deleted successfully"),
    })))
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Question",
        id,
    })
}

/// Fail with `ReferentialIntegrity` naming every id in `ids` that has no
/// stored question.
pub(crate) async fn ensure_questions_exist(pool: &PgPool, ids: &[DbId]) -> AppResult<()> {
    let missing = QuestionRepo::find_missing_ids(pool, ids).await?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::ReferentialIntegrity {
            entity: "Question",
            ids: missing,
        }))
    }
}
