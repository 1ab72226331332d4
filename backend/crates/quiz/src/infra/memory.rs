//! In-Memory Repository Implementations
//!
//! Quizzes and responses share one lock so deleting a quiz removes its
//! responses in the same step, as the foreign keys do in PostgreSQL.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{QuestionId, QuizId, UserId};
use tokio::sync::Mutex;

use crate::domain::question::Question;
use crate::domain::quiz::{
    AnswerRecord, GradedAnswer, GradedAttempt, NewQuiz, Quiz, QuizSummary, Respondent,
};
use crate::domain::repository::{QuizStore, ResponseStore};
use crate::error::{QuizError, QuizResult};

/// In-memory quiz repository
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct MemoryQuizRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    last_quiz_id: i64,
    last_question_id: i64,
    quizzes: BTreeMap<QuizId, Quiz>,
    responses: BTreeMap<(QuizId, UserId), StoredResponse>,
}

struct StoredResponse {
    display_name: String,
    total_score: f64,
    answers: Vec<GradedAnswer>,
}

impl MemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored responses across all quizzes
    pub async fn response_count(&self) -> usize {
        self.state.lock().await.responses.len()
    }
}

// ============================================================================
// Quiz Store Implementation
// ============================================================================

impl QuizStore for MemoryQuizRepository {
    async fn create_quiz(&self, quiz: &NewQuiz) -> QuizResult<Quiz> {
        let mut state = self.state.lock().await;

        state.last_quiz_id += 1;
        let quiz_id = QuizId::from_i64(state.last_quiz_id);

        let mut questions = Vec::with_capacity(quiz.questions.len());
        for content in &quiz.questions {
            state.last_question_id += 1;
            questions.push(Question {
                question_id: QuestionId::from_i64(state.last_question_id),
                quiz_id,
                content: content.clone(),
            });
        }

        let created = Quiz {
            quiz_id,
            title: quiz.title.clone(),
            created_by: quiz.created_by,
            questions,
            created_at: Utc::now(),
        };
        state.quizzes.insert(quiz_id, created.clone());

        Ok(created)
    }

    async fn list_quizzes(&self) -> QuizResult<Vec<QuizSummary>> {
        let state = self.state.lock().await;
        Ok(state
            .quizzes
            .values()
            .map(|quiz| QuizSummary {
                quiz_id: quiz.quiz_id,
                title: quiz.title.clone(),
                question_count: quiz.questions.len() as i64,
                created_at: quiz.created_at,
            })
            .collect())
    }

    async fn quiz_exists(&self, quiz_id: QuizId) -> QuizResult<bool> {
        Ok(self.state.lock().await.quizzes.contains_key(&quiz_id))
    }

    async fn find_questions(&self, quiz_id: QuizId) -> QuizResult<Option<Vec<Question>>> {
        let state = self.state.lock().await;
        Ok(state.quizzes.get(&quiz_id).map(|quiz| quiz.questions.clone()))
    }

    async fn delete_quiz(&self, quiz_id: QuizId) -> QuizResult<bool> {
        let mut state = self.state.lock().await;
        if state.quizzes.remove(&quiz_id).is_none() {
            return Ok(false);
        }
        state.responses.retain(|(quiz, _), _| *quiz != quiz_id);
        Ok(true)
    }
}

// ============================================================================
// Response Store Implementation
// ============================================================================

impl ResponseStore for MemoryQuizRepository {
    async fn has_response(&self, quiz_id: QuizId, user_id: UserId) -> QuizResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .responses
            .contains_key(&(quiz_id, user_id)))
    }

    async fn record_attempt(&self, attempt: &GradedAttempt) -> QuizResult<()> {
        let mut state = self.state.lock().await;

        if !state.quizzes.contains_key(&attempt.quiz_id) {
            return Err(QuizError::QuizNotFound);
        }

        let key = (attempt.quiz_id, attempt.user_id);
        if state.responses.contains_key(&key) {
            return Err(QuizError::AlreadyAttempted);
        }

        state.responses.insert(
            key,
            StoredResponse {
                display_name: attempt.display_name.clone(),
                total_score: attempt.total_score,
                answers: attempt.answers.clone(),
            },
        );
        Ok(())
    }

    async fn list_respondents(&self, quiz_id: QuizId) -> QuizResult<Vec<Respondent>> {
        let state = self.state.lock().await;

        let mut respondents: Vec<Respondent> = state
            .responses
            .iter()
            .filter(|((quiz, _), _)| *quiz == quiz_id)
            .map(|((_, user_id), response)| Respondent {
                user_id: *user_id,
                display_name: response.display_name.clone(),
                total_score: response.total_score,
            })
            .collect();
        respondents.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then(a.user_id.cmp(&b.user_id))
        });

        Ok(respondents)
    }

    async fn list_answers(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> QuizResult<Vec<AnswerRecord>> {
        let state = self.state.lock().await;

        let (Some(quiz), Some(response)) = (
            state.quizzes.get(&quiz_id),
            state.responses.get(&(quiz_id, user_id)),
        ) else {
            return Ok(Vec::new());
        };

        // Answers were stored in question order
        Ok(response
            .answers
            .iter()
            .filter_map(|answer| {
                quiz.questions
                    .iter()
                    .find(|q| q.question_id == answer.question_id)
                    .map(|q| AnswerRecord {
                        question_id: answer.question_id,
                        question_text: q.content.text().to_string(),
                        student_answer: answer.student_answer.clone(),
                        score: answer.score,
                    })
            })
            .collect())
    }

    async fn delete_response(&self, quiz_id: QuizId, user_id: UserId) -> QuizResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.responses.remove(&(quiz_id, user_id)).is_some())
    }
}
