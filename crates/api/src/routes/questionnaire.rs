//! Route definitions for the `/questionnaire` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::questionnaire;
use crate::state::AppState;

/// ```text
/// GET    /questionnaire/        -> list
/// POST   /questionnaire/        -> create
/// GET    /questionnaire/{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(questionnaire::list).post(questionnaire::create);

    Router::new()
        .route("/questionnaire", collection.clone())
        .route("/questionnaire/", collection)
        .route("/questionnaire/{id}", get(questionnaire::get_by_id))
}
