//! Quiz Service
//!
//! Facade over the authoring, attempt and review use cases. Errors are
//! logged once here, as they leave the crate.

use std::collections::HashMap;
use std::sync::Arc;

use auth::SessionResolver;
use kernel::id::{QuestionId, QuizId, UserId};

use crate::application::{
    attempt::AttemptUseCase, authoring::AuthoringUseCase, config::QuizConfig,
    guard::SessionGuard, review::ReviewUseCase,
};
use crate::domain::question::{QuestionContent, QuestionPrompt};
use crate::domain::quiz::{AnswerRecord, AttemptResult, Quiz, QuizSummary, Respondent};
use crate::domain::repository::{QuizStore, ResponseStore};
use crate::error::{QuizError, QuizResult};

/// Quiz service
pub struct QuizService<A, Q, R>
where
    Q: QuizStore,
    R: ResponseStore,
{
    authoring: AuthoringUseCase<A, Q>,
    attempt: AttemptUseCase<A, Q, R>,
    review: ReviewUseCase<A, Q, R>,
}

impl<A, Q, R> QuizService<A, Q, R>
where
    A: SessionResolver + Send + Sync,
    Q: QuizStore + Send + Sync,
    R: ResponseStore + Send + Sync,
{
    pub fn new(resolver: Arc<A>, quizzes: Arc<Q>, responses: Arc<R>, config: Arc<QuizConfig>) -> Self {
        let guard = SessionGuard::new(resolver);
        Self {
            authoring: AuthoringUseCase::new(guard.clone(), quizzes.clone(), config.clone()),
            attempt: AttemptUseCase::new(
                guard.clone(),
                quizzes.clone(),
                responses.clone(),
                config.clone(),
            ),
            review: ReviewUseCase::new(guard, quizzes, responses, config),
        }
    }

    // ========================================================================
    // Authoring (teacher)
    // ========================================================================

    pub async fn create_quiz(
        &self,
        token: &str,
        title: &str,
        questions: Vec<QuestionContent>,
    ) -> QuizResult<Quiz> {
        self.authoring
            .create_quiz(token, title, questions)
            .await
            .inspect_err(QuizError::log)
    }

    pub async fn list_quizzes(&self, token: &str) -> QuizResult<Vec<QuizSummary>> {
        self.authoring
            .list_quizzes(token)
            .await
            .inspect_err(QuizError::log)
    }

    pub async fn delete_quiz(&self, token: &str, quiz_id: QuizId) -> QuizResult<()> {
        self.authoring
            .delete_quiz(token, quiz_id)
            .await
            .inspect_err(QuizError::log)
    }

    // ========================================================================
    // Attempt (student)
    // ========================================================================

    pub async fn open_quiz(&self, token: &str, quiz_id: QuizId) -> QuizResult<Vec<QuestionPrompt>> {
        self.attempt
            .open_quiz(token, quiz_id)
            .await
            .inspect_err(QuizError::log)
    }

    pub async fn submit_attempt(
        &self,
        token: &str,
        quiz_id: QuizId,
        answers: HashMap<QuestionId, String>,
    ) -> QuizResult<AttemptResult> {
        self.attempt
            .submit_attempt(token, quiz_id, answers)
            .await
            .inspect_err(QuizError::log)
    }

    // ========================================================================
    // Review (teacher)
    // ========================================================================

    pub async fn list_respondents(&self, token: &str, quiz_id: QuizId) -> QuizResult<Vec<Respondent>> {
        self.review
            .list_respondents(token, quiz_id)
            .await
            .inspect_err(QuizError::log)
    }

    pub async fn list_answers(
        &self,
        token: &str,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> QuizResult<Vec<AnswerRecord>> {
        self.review
            .list_answers(token, quiz_id, user_id)
            .await
            .inspect_err(QuizError::log)
    }

    pub async fn delete_response(
        &self,
        token: &str,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> QuizResult<()> {
        self.review
            .delete_response(token, quiz_id, user_id)
            .await
            .inspect_err(QuizError::log)
    }
}
