//! Quiz Error Types
//!
//! This module provides quiz-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind, store::classify};
use platform::deadline::DeadlineExceeded;
use thiserror::Error;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
#[derive(Debug, Error)]
pub enum QuizError {
    /// No session, or the token is unknown
    #[error("Not signed in")]
    Unauthenticated,

    /// Session token has expired
    #[error("Session expired")]
    SessionExpired,

    /// Signed in with the wrong role for this operation
    #[error("Not permitted for this role")]
    Forbidden,

    #[error("Quiz not found")]
    QuizNotFound,

    /// Student already has a response on this quiz
    #[error("Quiz already attempted")]
    AlreadyAttempted,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store unreachable or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::Unauthenticated => ErrorKind::Unauthenticated,
            QuizError::SessionExpired => ErrorKind::Expired,
            QuizError::Forbidden => ErrorKind::Forbidden,
            QuizError::QuizNotFound => ErrorKind::NotFound,
            QuizError::AlreadyAttempted => ErrorKind::Conflict,
            QuizError::InvalidInput(_) => ErrorKind::InvalidInput,
            QuizError::StoreUnavailable(_) => ErrorKind::Unavailable,
            QuizError::Database(_) | QuizError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            QuizError::Unauthenticated => {
                AppError::unauthenticated("Please log in").with_action("Log in and try again")
            }
            QuizError::SessionExpired => AppError::new(self.kind(), "Your session has expired")
                .with_action("Please log in again"),
            QuizError::Forbidden => AppError::forbidden("You cannot do this with your role"),
            QuizError::QuizNotFound => AppError::not_found("Quiz not found"),
            QuizError::AlreadyAttempted => {
                AppError::conflict("You have already attempted this quiz")
            }
            QuizError::InvalidInput(msg) => AppError::invalid_input(msg.clone()),
            QuizError::StoreUnavailable(_) => {
                AppError::unavailable("The service is temporarily unavailable")
                    .with_action("Please try again shortly")
            }
            QuizError::Database(_) | QuizError::Internal(_) => {
                AppError::internal("An unexpected error occurred")
            }
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            QuizError::Database(e) => {
                tracing::error!(error = %e, "Quiz database error");
            }
            QuizError::Internal(msg) => {
                tracing::error!(message = %msg, "Quiz internal error");
            }
            QuizError::StoreUnavailable(msg) => {
                tracing::error!(message = %msg, "Quiz store unavailable");
            }
            QuizError::Forbidden => {
                tracing::warn!("Forbidden quiz operation");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz error");
            }
        }
    }
}

impl From<AuthError> for QuizError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionExpired => QuizError::SessionExpired,
            AuthError::StoreUnavailable(msg) => QuizError::StoreUnavailable(msg),
            AuthError::Database(e) => QuizError::Database(e),
            other => QuizError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for QuizError {
    fn from(err: sqlx::Error) -> Self {
        if classify(&err).is_unavailable() {
            QuizError::StoreUnavailable(err.to_string())
        } else {
            QuizError::Database(err)
        }
    }
}

impl From<DeadlineExceeded> for QuizError {
    fn from(err: DeadlineExceeded) -> Self {
        QuizError::StoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_auth_error() {
        assert!(matches!(
            QuizError::from(AuthError::SessionExpired),
            QuizError::SessionExpired
        ));
        assert!(matches!(
            QuizError::from(AuthError::StoreUnavailable("down".into())),
            QuizError::StoreUnavailable(_)
        ));
        assert!(matches!(
            QuizError::from(AuthError::TokenCollision),
            QuizError::Internal(_)
        ));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(QuizError::Unauthenticated.kind(), ErrorKind::Unauthenticated);
        assert!(QuizError::SessionExpired.kind().requires_sign_in());
        assert_eq!(QuizError::AlreadyAttempted.kind(), ErrorKind::Conflict);
        assert_eq!(QuizError::QuizNotFound.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_app_error_has_action_for_sign_in() {
        let err = QuizError::Unauthenticated.to_app_error();
        assert!(err.action().is_some());
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }
}
