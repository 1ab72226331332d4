//! Authoring Use Case
//!
//! Teachers create and delete quizzes; anyone signed in may list them.

use std::sync::Arc;

use auth::{SessionResolver, UserRole};
use kernel::id::QuizId;

use crate::application::{config::QuizConfig, guard::SessionGuard, store_call};
use crate::domain::question::QuestionContent;
use crate::domain::quiz::{NewQuiz, Quiz, QuizSummary};
use crate::domain::repository::QuizStore;
use crate::error::{QuizError, QuizResult};

/// Authoring use case
pub struct AuthoringUseCase<A, Q>
where
    Q: QuizStore,
{
    guard: SessionGuard<A>,
    quiz_repo: Arc<Q>,
    config: Arc<QuizConfig>,
}

impl<A, Q> AuthoringUseCase<A, Q>
where
    A: SessionResolver + Send + Sync,
    Q: QuizStore + Send + Sync,
{
    pub fn new(guard: SessionGuard<A>, quiz_repo: Arc<Q>, config: Arc<QuizConfig>) -> Self {
        Self {
            guard,
            quiz_repo,
            config,
        }
    }

    /// Create a quiz
    ///
    /// Questions with blank text are dropped; at least one must remain.
    pub async fn create_quiz(
        &self,
        token: &str,
        title: &str,
        questions: Vec<QuestionContent>,
    ) -> QuizResult<Quiz> {
        let teacher = self.guard.require(token, UserRole::Teacher).await?;

        let title = title.trim();
        if title.is_empty() {
            return Err(QuizError::InvalidInput(
                "Quiz title cannot be empty".to_string(),
            ));
        }

        let questions: Vec<QuestionContent> = questions
            .into_iter()
            .filter(|q| !q.text().is_empty())
            .collect();
        if questions.is_empty() {
            return Err(QuizError::InvalidInput(
                "A quiz needs at least one question".to_string(),
            ));
        }

        let quiz = store_call(
            self.config.store_timeout,
            self.quiz_repo.create_quiz(&NewQuiz {
                title: title.to_string(),
                created_by: teacher.user_id,
                questions,
            }),
        )
        .await?;

        tracing::info!(
            quiz_id = %quiz.quiz_id,
            user_id = %teacher.user_id,
            questions = quiz.questions.len(),
            "Quiz created"
        );

        Ok(quiz)
    }

    pub async fn list_quizzes(&self, token: &str) -> QuizResult<Vec<QuizSummary>> {
        self.guard.signed_in(token).await?;
        store_call(self.config.store_timeout, self.quiz_repo.list_quizzes()).await
    }

    /// Delete a quiz together with its questions and every response to it
    pub async fn delete_quiz(&self, token: &str, quiz_id: QuizId) -> QuizResult<()> {
        let teacher = self.guard.require(token, UserRole::Teacher).await?;

        let deleted =
            store_call(self.config.store_timeout, self.quiz_repo.delete_quiz(quiz_id)).await?;
        if !deleted {
            return Err(QuizError::QuizNotFound);
        }

        tracing::info!(quiz_id = %quiz_id, user_id = %teacher.user_id, "Quiz deleted");
        Ok(())
    }
}
