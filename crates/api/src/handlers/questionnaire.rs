//! Handlers for the `/questionnaire` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quizbank_core::error::CoreError;
use quizbank_core::questionnaire::validate_questionnaire;
use quizbank_core::types::DbId;
use quizbank_db::models::questionnaire::{CreateQuestionnaire, Questionnaire};
use quizbank_db::repositories::QuestionnaireRepo;

use super::question::ensure_questions_exist;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /questionnaire/
///
/// The order of `question_ids` is the order of the questions. All ids must
/// refer to existing questions at creation time; later deletions are not
/// tracked.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateQuestionnaire>,
) -> AppResult<(StatusCode, Json<Questionnaire>)> {
    validate_questionnaire(&input.title, input.description.as_deref(), &input.question_ids)?;
    ensure_questions_exist(&state.pool, &input.question_ids).await?;

    let questionnaire = QuestionnaireRepo::create(&state.pool, &input).await?;

    tracing::info!(
        questionnaire_id = questionnaire.id,
        question_count = questionnaire.question_ids.len(),
        "Questionnaire created",
    );

    Ok((StatusCode::CREATED, Json(questionnaire)))
}

/// GET /questionnaire/
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Questionnaire>>>> {
    let questionnaires = QuestionnaireRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: questionnaires,
    }))
}

/// GET /questionnaire/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Questionnaire>> {
    let questionnaire = QuestionnaireRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Questionnaire",
            id,
        }))?;
    Ok(Json(questionnaire))
}
