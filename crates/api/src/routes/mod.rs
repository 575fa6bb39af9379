pub mod health;
pub mod question;
pub mod questionnaire;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Collection paths answer both with and without a trailing slash.
///
/// ```text
/// /question/                 list, create
/// /question/{id}             get, update, delete
///
/// /questionnaire/            list, create
/// /questionnaire/{id}        get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(question::router())
        .merge(questionnaire::router())
}
