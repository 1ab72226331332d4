//! Domain Layer
//!
//! Question model, quiz and response entities, repository traits.

pub mod question;
pub mod quiz;
pub mod repository;

// Re-exports
pub use question::{Question, QuestionContent, QuestionPrompt, QuestionVariant};
pub use quiz::{
    AnswerRecord, AttemptResult, GradedAnswer, GradedAttempt, NewQuiz, Quiz, QuizSummary,
    Respondent,
};
pub use repository::{QuizStore, ResponseStore};
