//! Attempt Use Case
//!
//! Students open a quiz once and submit their answers for grading.

use std::collections::HashMap;
use std::sync::Arc;

use auth::{SessionResolver, UserRole};
use kernel::id::{QuestionId, QuizId};

use crate::application::{config::QuizConfig, guard::SessionGuard, store_call};
use crate::domain::question::QuestionPrompt;
use crate::domain::quiz::{AttemptResult, GradedAnswer, GradedAttempt};
use crate::domain::repository::{QuizStore, ResponseStore};
use crate::error::{QuizError, QuizResult};

/// Attempt use case
pub struct AttemptUseCase<A, Q, R>
where
    Q: QuizStore,
    R: ResponseStore,
{
    guard: SessionGuard<A>,
    quiz_repo: Arc<Q>,
    response_repo: Arc<R>,
    config: Arc<QuizConfig>,
}

impl<A, Q, R> AttemptUseCase<A, Q, R>
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

    /// Questions of a quiz the student has not attempted yet, in order
    pub async fn open_quiz(&self, token: &str, quiz_id: QuizId) -> QuizResult<Vec<QuestionPrompt>> {
        let student = self.guard.require(token, UserRole::Student).await?;

        let questions = store_call(
            self.config.store_timeout,
            self.quiz_repo.find_questions(quiz_id),
        )
        .await?
        .ok_or(QuizError::QuizNotFound)?;

        let attempted = store_call(
            self.config.store_timeout,
            self.response_repo.has_response(quiz_id, student.user_id),
        )
        .await?;
        if attempted {
            return Err(QuizError::AlreadyAttempted);
        }

        Ok(questions.iter().map(|q| q.prompt()).collect())
    }

    /// Grade and record a submission
    ///
    /// Unanswered questions are graded as the empty string. The response
    /// key is unique per student and quiz, so a racing second submission
    /// still fails with `AlreadyAttempted`.
    pub async fn submit_attempt(
        &self,
        token: &str,
        quiz_id: QuizId,
        answers: HashMap<QuestionId, String>,
    ) -> QuizResult<AttemptResult> {
        let student = self.guard.require(token, UserRole::Student).await?;

        let questions = store_call(
            self.config.store_timeout,
            self.quiz_repo.find_questions(quiz_id),
        )
        .await?
        .ok_or(QuizError::QuizNotFound)?;

        if let Some(stray) = answers
            .keys()
            .find(|id| !questions.iter().any(|q| q.question_id == **id))
        {
            return Err(QuizError::InvalidInput(format!(
                "Question {stray} is not part of quiz {quiz_id}"
            )));
        }

        let graded: Vec<GradedAnswer> = questions
            .iter()
            .map(|q| {
                let answer = answers.get(&q.question_id).map(String::as_str).unwrap_or("");
                GradedAnswer {
                    question_id: q.question_id,
                    student_answer: answer.to_string(),
                    score: q.grade(answer),
                }
            })
            .collect();
        let total_score: f64 = graded.iter().map(|a| a.score).sum();

        store_call(
            self.config.store_timeout,
            self.response_repo.record_attempt(&GradedAttempt {
                quiz_id,
                user_id: student.user_id,
                display_name: student.display_name.as_str().to_string(),
                answers: graded.clone(),
                total_score,
            }),
        )
        .await?;

        tracing::info!(
            quiz_id = %quiz_id,
            user_id = %student.user_id,
            total_score,
            "Quiz attempt recorded"
        );

        Ok(AttemptResult {
            quiz_id,
            total_score,
            max_score: questions.len() as f64,
            answers: graded,
        })
    }
}
