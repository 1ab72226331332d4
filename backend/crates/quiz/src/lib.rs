//! Quiz Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Question model, quiz and response entities, repository traits
//! - `application/` - Session-protected workflows and the [`QuizService`] facade
//! - `infra/` - PostgreSQL and in-memory implementations
//!
//! ## Workflows
//! - Teachers author, list and delete quizzes
//! - Students open a quiz once and submit answers for grading
//! - Teachers review respondents and answers, and may clear a response
//!
//! Every operation takes a session token and resolves it through
//! [`auth::SessionResolver`] before touching the store.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::{config::QuizConfig, service::QuizService};
pub use domain::question::{
    Question, QuestionContent, QuestionError, QuestionPrompt, QuestionVariant,
};
pub use domain::quiz::{
    AnswerRecord, AttemptResult, GradedAnswer, Quiz, QuizSummary, Respondent,
};
pub use error::{QuizError, QuizResult};
pub use infra::{memory::MemoryQuizRepository, postgres::PgQuizRepository};
