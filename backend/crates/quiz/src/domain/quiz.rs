//! Quiz and Response Entities

use chrono::{DateTime, Utc};
use kernel::id::{QuestionId, QuizId, UserId};
use serde::Serialize;

use crate::domain::question::{Question, QuestionContent};

/// Quiz with its questions in presentation order
#[derive(Debug, Clone)]
pub struct Quiz {
    pub quiz_id: QuizId,
    pub title: String,
    /// Teacher who authored the quiz
    pub created_by: UserId,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

/// Listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub quiz_id: QuizId,
    pub title: String,
    pub question_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Quiz handed to the store; questions keep their order
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub created_by: UserId,
    pub questions: Vec<QuestionContent>,
}

/// One graded answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedAnswer {
    pub question_id: QuestionId,
    /// Answer as submitted (untrimmed); empty when the question was skipped
    pub student_answer: String,
    pub score: f64,
}

/// A complete graded submission, stored atomically
#[derive(Debug, Clone)]
pub struct GradedAttempt {
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub display_name: String,
    pub answers: Vec<GradedAnswer>,
    pub total_score: f64,
}

/// Result returned to the student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptResult {
    pub quiz_id: QuizId,
    pub total_score: f64,
    pub max_score: f64,
    pub answers: Vec<GradedAnswer>,
}

/// Student who has a response on a quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Respondent {
    pub user_id: UserId,
    pub display_name: String,
    pub total_score: f64,
}

/// One answer as shown to a reviewing teacher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub student_answer: String,
    pub score: f64,
}
