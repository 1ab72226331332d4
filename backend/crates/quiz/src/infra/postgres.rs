//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::store::{StoreFailure, classify};
use kernel::id::{QuestionId, QuizId, UserId};
use sqlx::PgPool;

use crate::domain::question::{Question, QuestionContent};
use crate::domain::quiz::{
    AnswerRecord, GradedAttempt, NewQuiz, Quiz, QuizSummary, Respondent,
};
use crate::domain::repository::{QuizStore, ResponseStore};
use crate::error::{QuizError, QuizResult};

/// Primary key on `responses (user_id, quiz_id)`
const RESPONSE_KEY_CONSTRAINT: &str = "responses_pkey";

/// PostgreSQL-backed quiz repository
#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Quiz Store Implementation
// ============================================================================

impl QuizStore for PgQuizRepository {
    async fn create_quiz(&self, quiz: &NewQuiz) -> QuizResult<Quiz> {
        let mut tx = self.pool.begin().await?;

        let (quiz_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO quizzes (title, created_by)
            VALUES ($1, $2)
            RETURNING quiz_id, created_at
            "#,
        )
        .bind(&quiz.title)
        .bind(quiz.created_by.as_i64())
        .fetch_one(&mut *tx)
        .await?;
        let quiz_id = QuizId::from_i64(quiz_id);

        let mut questions = Vec::with_capacity(quiz.questions.len());
        for (position, content) in quiz.questions.iter().enumerate() {
            let question_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO questions
                    (quiz_id, position, question_text, question_type, options, correct_answer)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING question_id
                "#,
            )
            .bind(quiz_id.as_i64())
            .bind(position as i32)
            .bind(content.text())
            .bind(content.variant().label())
            .bind(content.variant().options())
            .bind(content.correct_answer())
            .fetch_one(&mut *tx)
            .await?;

            questions.push(Question {
                question_id: QuestionId::from_i64(question_id),
                quiz_id,
                content: content.clone(),
            });
        }

        tx.commit().await?;

        Ok(Quiz {
            quiz_id,
            title: quiz.title.clone(),
            created_by: quiz.created_by,
            questions,
            created_at,
        })
    }

    async fn list_quizzes(&self) -> QuizResult<Vec<QuizSummary>> {
        let rows = sqlx::query_as::<_, QuizSummaryRow>(
            r#"
            SELECT
                z.quiz_id,
                z.title,
                z.created_at,
                COUNT(q.question_id) AS question_count
            FROM quizzes z
            LEFT JOIN questions q ON q.quiz_id = z.quiz_id
            GROUP BY z.quiz_id, z.title, z.created_at
            ORDER BY z.created_at, z.quiz_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuizSummaryRow::into_summary).collect())
    }

    async fn quiz_exists(&self, quiz_id: QuizId) -> QuizResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM quizzes WHERE quiz_id = $1)")
                .bind(quiz_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_questions(&self, quiz_id: QuizId) -> QuizResult<Option<Vec<Question>>> {
        if !self.quiz_exists(quiz_id).await? {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT question_id, quiz_id, question_text, question_type, options, correct_answer
            FROM questions
            WHERE quiz_id = $1
            ORDER BY position
            "#,
        )
        .bind(quiz_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(QuestionRow::into_question)
            .collect::<QuizResult<Vec<_>>>()
            .map(Some)
    }

    async fn delete_quiz(&self, quiz_id: QuizId) -> QuizResult<bool> {
        // questions, responses and student_answers cascade
        let deleted = sqlx::query("DELETE FROM quizzes WHERE quiz_id = $1")
            .bind(quiz_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Response Store Implementation
// ============================================================================

impl ResponseStore for PgQuizRepository {
    async fn has_response(&self, quiz_id: QuizId, user_id: UserId) -> QuizResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM responses WHERE quiz_id = $1 AND user_id = $2)",
        )
        .bind(quiz_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn record_attempt(&self, attempt: &GradedAttempt) -> QuizResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO responses (user_id, quiz_id, total_score)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(attempt.user_id.as_i64())
        .bind(attempt.quiz_id.as_i64())
        .bind(attempt.total_score)
        .execute(&mut *tx)
        .await
        .map_err(response_conflict)?;

        for answer in &attempt.answers {
            sqlx::query(
                r#"
                INSERT INTO student_answers (user_id, quiz_id, question_id, student_answer, score)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(attempt.user_id.as_i64())
            .bind(attempt.quiz_id.as_i64())
            .bind(answer.question_id.as_i64())
            .bind(&answer.student_answer)
            .bind(answer.score)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_respondents(&self, quiz_id: QuizId) -> QuizResult<Vec<Respondent>> {
        let rows = sqlx::query_as::<_, RespondentRow>(
            r#"
            SELECT r.user_id, u.display_name, r.total_score
            FROM responses r
            JOIN users u ON u.user_id = r.user_id
            WHERE r.quiz_id = $1
            ORDER BY u.display_name, r.user_id
            "#,
        )
        .bind(quiz_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RespondentRow::into_respondent).collect())
    }

    async fn list_answers(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> QuizResult<Vec<AnswerRecord>> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT a.question_id, q.question_text, a.student_answer, a.score
            FROM student_answers a
            JOIN questions q ON q.question_id = a.question_id
            WHERE a.quiz_id = $1 AND a.user_id = $2
            ORDER BY q.position
            "#,
        )
        .bind(quiz_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AnswerRow::into_record).collect())
    }

    async fn delete_response(&self, quiz_id: QuizId, user_id: UserId) -> QuizResult<bool> {
        // student_answers cascade
        let deleted = sqlx::query("DELETE FROM responses WHERE quiz_id = $1 AND user_id = $2")
            .bind(quiz_id.as_i64())
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// A second response for the same key, or a quiz deleted mid-submission
fn response_conflict(err: sqlx::Error) -> QuizError {
    match classify(&err) {
        failure if failure.is_unique_on(RESPONSE_KEY_CONSTRAINT) => QuizError::AlreadyAttempted,
        StoreFailure::ForeignKeyViolation(_) => QuizError::QuizNotFound,
        _ => err.into(),
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct QuizSummaryRow {
    quiz_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    question_count: i64,
}

impl QuizSummaryRow {
    fn into_summary(self) -> QuizSummary {
        QuizSummary {
            quiz_id: QuizId::from_i64(self.quiz_id),
            title: self.title,
            question_count: self.question_count,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    question_id: i64,
    quiz_id: i64,
    question_text: String,
    question_type: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuestionRow {
    fn into_question(self) -> QuizResult<Question> {
        let content = QuestionContent::from_stored(
            &self.question_type,
            self.question_text,
            self.options,
            self.correct_answer,
        )
        .map_err(|e| QuizError::Internal(format!("Invalid stored question: {e}")))?;

        Ok(Question {
            question_id: QuestionId::from_i64(self.question_id),
            quiz_id: QuizId::from_i64(self.quiz_id),
            content,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RespondentRow {
    user_id: i64,
    display_name: String,
    total_score: f64,
}

impl RespondentRow {
    fn into_respondent(self) -> Respondent {
        Respondent {
            user_id: UserId::from_i64(self.user_id),
            display_name: self.display_name,
            total_score: self.total_score,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    question_id: i64,
    question_text: String,
    student_answer: String,
    score: f64,
}

impl AnswerRow {
    fn into_record(self) -> AnswerRecord {
        AnswerRecord {
            question_id: QuestionId::from_i64(self.question_id),
            question_text: self.question_text,
            student_answer: self.student_answer,
            score: self.score,
        }
    }
}
