//! Review Use Case
//!
//! Teachers inspect responses and may clear one so the student can retake the quiz.

use std::sync::Arc;

use auth::{SessionResolver, UserRole};
use kernel::id::{QuizId, UserId};

use crate::application::{config::QuizConfig, guard::SessionGuard, store_call};
use crate::domain::quiz::{AnswerRecord, Respondent};
use crate::domain::repository::{QuizStore, ResponseStore};
use crate::error::{QuizError, QuizResult};

/// Review use case
pub struct ReviewUseCase<A, Q, R>
where
    Q: QuizStore,
    R: ResponseStore,
{
    guard: SessionGuard<A>,
    quiz_repo: Arc<Q>,
    response_repo: Arc<R>,
    config: Arc<QuizConfig>,
}

impl<A, Q, R> ReviewUseCase<A, Q, R>
where
    A: SessionResolver + Send + Sync,
    Q: QuizStore + Send + Sync,
    R: ResponseStore + Send + Sync,
{
    pub fn new(
        guard: SessionGuard<A>,
        quiz_repo: Arc<Q>,
        response_repo: Arc<R>,
        config: Arc<QuizConfig>,
    ) -> Self {
        Self {
            guard,
            quiz_repo,
            response_repo,
            config,
        }
    }

    pub async fn list_respondents(&self, token: &str, quiz_id: QuizId) -> QuizResult<Vec<Respondent>> {
        self.guard.require(token, UserRole::Teacher).await?;
        self.ensure_quiz(quiz_id).await?;

        store_call(
            self.config.store_timeout,
            self.response_repo.list_respondents(quiz_id),
        )
        .await
    }

    pub async fn list_answers(
        &self,
        token: &str,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> QuizResult<Vec<AnswerRecord>> {
        self.guard.require(token, UserRole::Teacher).await?;
        self.ensure_quiz(quiz_id).await?;

        store_call(
            self.config.store_timeout,
            self.response_repo.list_answers(quiz_id, user_id),
        )
        .await
    }

    /// Remove a student's response so they may attempt again. Idempotent
    pub async fn delete_response(
        &self,
        token: &str,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> QuizResult<()> {
        let teacher = self.guard.require(token, UserRole::Teacher).await?;

        let deleted = store_call(
            self.config.store_timeout,
            self.response_repo.delete_response(quiz_id, user_id),
        )
        .await?;

        if deleted {
            tracing::info!(
                quiz_id = %quiz_id,
                student_id = %user_id,
                user_id = %teacher.user_id,
                "Response deleted"
            );
        }
        Ok(())
    }

    async fn ensure_quiz(&self, quiz_id: QuizId) -> QuizResult<()> {
        let exists =
            store_call(self.config.store_timeout, self.quiz_repo.quiz_exists(quiz_id)).await?;
        if exists {
            Ok(())
        } else {
            Err(QuizError::QuizNotFound)
        }
    }
}
