pub mod question;
pub mod questionnaire;
