//! `GET /health`: database reachability and schema version.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` (schema behind this build) or `unavailable`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    pub schema_version: Option<i64>,
    pub expected_schema_version: Option<i64>,
}

/// Responds 503 only when the schema cannot be read at all. A schema that
/// lags behind the embedded migrations still serves requests, so it is
/// reported as `degraded` with 200.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, database) = match quizbank_db::schema_status(&state.pool).await {
        Ok(schema) => (
            StatusCode::OK,
            if schema.is_current() { "ok" } else { "degraded" },
            DatabaseHealth {
                reachable: true,
                schema_version: schema.applied,
                expected_schema_version: schema.expected,
            },
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not read schema version");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                DatabaseHealth {
                    reachable: false,
                    schema_version: None,
                    expected_schema_version: None,
                },
            )
        }
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
