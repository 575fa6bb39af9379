//! Domain layer for the quizbank service.
//!
//! Pure validation and merge logic for questions and questionnaires. This
//! crate has no database or HTTP dependencies; the `db` and `api` crates
//! pass data in and persist whatever comes out.

pub mod error;
pub mod question;
pub mod questionnaire;
pub mod types;
