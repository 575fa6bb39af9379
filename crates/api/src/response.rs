//! Shared response envelope for list endpoints.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Collection endpoints wrap their rows in this; single-entity endpoints
/// return the entity object directly.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
