//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{QuizId, UserId};

use crate::domain::question::Question;
use crate::domain::quiz::{AnswerRecord, GradedAttempt, NewQuiz, Quiz, QuizSummary, Respondent};
use crate::error::QuizResult;

/// Quiz store trait
#[trait_variant::make(QuizStore: Send)]
pub trait LocalQuizStore {
    /// Insert a quiz and all of its questions in one transaction
    async fn create_quiz(&self, quiz: &NewQuiz) -> QuizResult<Quiz>;

    /// All quizzes, oldest first
    async fn list_quizzes(&self) -> QuizResult<Vec<QuizSummary>>;

    async fn quiz_exists(&self, quiz_id: QuizId) -> QuizResult<bool>;

    /// Questions in order; `None` if the quiz does not exist
    async fn find_questions(&self, quiz_id: QuizId) -> QuizResult<Option<Vec<Question>>>;

    /// Delete a quiz with its questions, responses and answers
    async fn delete_quiz(&self, quiz_id: QuizId) -> QuizResult<bool>;
}

/// Response store trait
#[trait_variant::make(ResponseStore: Send)]
pub trait LocalResponseStore {
    async fn has_response(&self, quiz_id: QuizId, user_id: UserId) -> QuizResult<bool>;

    /// Store the response and its answers in one transaction
    ///
    /// `AlreadyAttempted` if the student already has a response for the quiz.
    async fn record_attempt(&self, attempt: &GradedAttempt) -> QuizResult<()>;

    /// Respondents ordered by display name
    async fn list_respondents(&self, quiz_id: QuizId) -> QuizResult<Vec<Respondent>>;

    /// Answers in question order
    async fn list_answers(&self, quiz_id: QuizId, user_id: UserId)
    -> QuizResult<Vec<AnswerRecord>>;

    /// Delete the response and its answers; `false` if there was none
    async fn delete_response(&self, quiz_id: QuizId, user_id: UserId) -> QuizResult<bool>;
}
