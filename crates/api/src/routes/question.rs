//! Route definitions for the `/question` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::question;
use crate::state::AppState;

/// ```text
/// GET    /question/        -> list
/// POST   /question/        -> create
/// GET    /question/{id}    -> get_by_id
/// PUT    /question/{id}    -> update
/// DELETE /question/{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(question::list).post(question::create);

    Router::new()
        .route("/question", collection.clone())
        .route("/question/", collection)
        .route(
            "/question/{id}",
            get(question::get_by_id)
                .put(question::update)
                .delete(question::delete),
        )
}
