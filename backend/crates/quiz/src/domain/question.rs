//! Question Model
//!
//! A question is one of three variants sharing a single grading rule:
//! the trimmed candidate answer must equal the correct answer, ignoring case.
//! Multiple-choice options are for presentation only and never consulted
//! while grading.
//!
//! Questions are immutable once constructed.

use kernel::id::{QuestionId, QuizId};
use serde::Serialize;
use thiserror::Error;

/// Stored labels, one per variant
pub const SHORT_ANSWER_LABEL: &str = "Short Answer";
pub const TRUE_FALSE_LABEL: &str = "True/False";
pub const MULTIPLE_CHOICE_LABEL: &str = "Multiple Choice";

const TRUE: &str = "True";
const FALSE: &str = "False";

/// Error rebuilding a question from stored fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("Unknown question type '{0}'")]
    UnknownType(String),

    #[error("True/False answer must be 'True' or 'False', got '{0}'")]
    InvalidTrueFalseAnswer(String),
}

/// Variant tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionVariant {
    ShortAnswer,
    TrueFalse,
    /// Ordered options shown to the student
    MultipleChoice { options: Vec<String> },
}

impl QuestionVariant {
    pub const fn label(&self) -> &'static str {
        match self {
            QuestionVariant::ShortAnswer => SHORT_ANSWER_LABEL,
            QuestionVariant::TrueFalse => TRUE_FALSE_LABEL,
            QuestionVariant::MultipleChoice { .. } => MULTIPLE_CHOICE_LABEL,
        }
    }

    /// Choices offered to the student; empty for short answers
    pub fn options(&self) -> Vec<String> {
        match self {
            QuestionVariant::ShortAnswer => Vec::new(),
            QuestionVariant::TrueFalse => vec![TRUE.to_string(), FALSE.to_string()],
            QuestionVariant::MultipleChoice { options } => options.clone(),
        }
    }
}

/// Question body: everything except store-assigned identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionContent {
    text: String,
    correct_answer: String,
    variant: QuestionVariant,
}

impl QuestionContent {
    pub fn short_answer(text: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self::build(text, correct_answer, QuestionVariant::ShortAnswer)
    }

    pub fn true_false(text: impl Into<String>, answer: bool) -> Self {
        let correct = if answer { TRUE } else { FALSE };
        Self::build(text, correct, QuestionVariant::TrueFalse)
    }

    /// Build a true/false question from free-form creator input
    ///
    /// Accepts "true"/"false" in any case; anything else is rejected.
    pub fn true_false_from_input(
        text: impl Into<String>,
        answer: &str,
    ) -> Result<Self, QuestionError> {
        parse_true_false(answer)
            .map(|answer| Self::true_false(text, answer))
            .ok_or_else(|| QuestionError::InvalidTrueFalseAnswer(answer.to_string()))
    }

    /// Multiple-choice question
    ///
    /// `correct_answer` should be one of `options`; this is the caller's
    /// responsibility and is not checked.
    pub fn multiple_choice(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        let options = options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        Self::build(
            text,
            correct_answer,
            QuestionVariant::MultipleChoice { options },
        )
    }

    /// Rebuild from stored columns
    pub fn from_stored(
        label: &str,
        text: String,
        options: Vec<String>,
        correct_answer: String,
    ) -> Result<Self, QuestionError> {
        match label {
            SHORT_ANSWER_LABEL => Ok(Self::short_answer(text, correct_answer)),
            TRUE_FALSE_LABEL => Self::true_false_from_input(text, &correct_answer),
            MULTIPLE_CHOICE_LABEL => Ok(Self::multiple_choice(text, options, correct_answer)),
            other => Err(QuestionError::UnknownType(other.to_string())),
        }
    }

    fn build(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        variant: QuestionVariant,
    ) -> Self {
        Self {
            text: text.into().trim().to_string(),
            correct_answer: correct_answer.into().trim().to_string(),
            variant,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn variant(&self) -> &QuestionVariant {
        &self.variant
    }

    /// Score a candidate answer: 1.0 on a match, else 0.0
    pub fn grade(&self, candidate: &str) -> f64 {
        if eq_ignore_case(candidate.trim(), &self.correct_answer) {
            1.0
        } else {
            0.0
        }
    }
}

/// Persisted question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question_id: QuestionId,
    pub quiz_id: QuizId,
    pub content: QuestionContent,
}

impl Question {
    pub fn grade(&self, candidate: &str) -> f64 {
        self.content.grade(candidate)
    }

    /// What a student sees: no correct answer
    pub fn prompt(&self) -> QuestionPrompt {
        QuestionPrompt {
            question_id: self.question_id,
            text: self.content.text.clone(),
            question_type: self.content.variant.label(),
            options: self.content.variant.options(),
        }
    }
}

/// Question as presented to a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPrompt {
    pub question_id: QuestionId,
    pub text: String,
    pub question_type: &'static str,
    pub options: Vec<String>,
}

fn parse_true_false(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if eq_ignore_case(raw, TRUE) {
        Some(true)
    } else if eq_ignore_case(raw, FALSE) {
        Some(false)
    } else {
        None
    }
}

/// Unicode-aware case-insensitive equality
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_short_answer_grading() {
        let q = QuestionContent::short_answer("Capital of France?", "Paris");
        assert_eq!(q.grade(" paris "), 1.0);
        assert_eq!(q.grade("PARIS"), 1.0);
        assert_eq!(q.grade("parisia"), 0.0);
        assert_eq!(q.grade(""), 0.0);
    }

    #[test]
    fn test_true_false_grading() {
        let q = QuestionContent::true_false("Sky is blue?", true);
        assert_eq!(q.correct_answer(), "True");
        assert_eq!(q.grade("true"), 1.0);
        assert_eq!(q.grade("False"), 0.0);
    }

    #[test]
    fn test_multiple_choice_grading() {
        let q = QuestionContent::multiple_choice("Pick B", abc(), "B");
        assert_eq!(q.grade("b"), 1.0);
        assert_eq!(q.grade("C"), 0.0);
    }

    #[test]
    fn test_options_are_not_consulted() {
        let q = QuestionContent::multiple_choice("Odd one", abc(), "Z");
        assert_eq!(q.grade("z"), 1.0);
        assert_eq!(q.grade("A"), 0.0);
    }

    #[test]
    fn test_unicode_case_folding() {
        let q = QuestionContent::short_answer("French for school", "ÉCOLE");
        assert_eq!(q.grade("école"), 1.0);
    }

    #[test]
    fn test_true_false_from_input() {
        let q = QuestionContent::true_false_from_input("Q", " FALSE ").unwrap();
        assert_eq!(q.correct_answer(), "False");
        assert_eq!(
            QuestionContent::true_false_from_input("Q", "yes"),
            Err(QuestionError::InvalidTrueFalseAnswer("yes".into()))
        );
    }

    #[test]
    fn test_labels_and_options() {
        assert_eq!(QuestionVariant::ShortAnswer.label(), "Short Answer");
        assert_eq!(QuestionVariant::TrueFalse.label(), "True/False");
        assert_eq!(QuestionVariant::TrueFalse.options(), vec!["True", "False"]);
        let mc = QuestionVariant::MultipleChoice { options: abc() };
        assert_eq!(mc.label(), "Multiple Choice");
        assert_eq!(mc.options(), abc());
    }

    #[test]
    fn test_from_stored() {
        let q = QuestionContent::from_stored("Multiple Choice", "Q".into(), abc(), "A".into())
            .unwrap();
        assert_eq!(q.variant().options(), abc());

        let q = QuestionContent::from_stored(
            "True/False",
            "Q".into(),
            vec!["True".into(), "False".into()],
            "True".into(),
        )
        .unwrap();
        assert_eq!(q.variant(), &QuestionVariant::TrueFalse);

        assert_eq!(
            QuestionContent::from_stored("Essay", "Q".into(), vec![], "x".into()),
            Err(QuestionError::UnknownType("Essay".into()))
        );
    }

    #[test]
    fn test_constructor_trims() {
        let q = QuestionContent::multiple_choice("  Q  ", vec![" A ".into(), " ".into()], " A ");
        assert_eq!(q.text(), "Q");
        assert_eq!(q.correct_answer(), "A");
        assert_eq!(q.variant().options(), vec!["A"]);
    }

    #[test]
    fn test_prompt_hides_answer() {
        let question = Question {
            question_id: QuestionId::from_i64(3),
            quiz_id: QuizId::from_i64(1),
            content: QuestionContent::true_false("Sky is blue?", true),
        };
        let json = serde_json::to_value(question.prompt()).unwrap();
        assert_eq!(json["question_id"], 3);
        assert_eq!(json["question_type"], "True/False");
        assert!(json.get("correct_answer").is_none());
    }
}
