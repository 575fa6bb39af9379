//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row. Question DTOs live in `quizbank_core::question` because the
//! entity is built from them; questionnaire DTOs live here.

pub mod question;
pub mod questionnaire;
