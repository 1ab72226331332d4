//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind, store::classify};
use platform::{deadline::DeadlineExceeded, password::PasswordHashError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User name already registered
    #[error("User name already exists")]
    DuplicateUsername,

    /// No account with the given user name
    #[error("User not found")]
    UserNotFound,

    /// Account exists but the password does not match
    #[error("Invalid password")]
    InvalidPassword,

    /// Session token is known but past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Role is not one of the recognized values
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Display name or user name rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Freshly generated token already present (retried internally)
    #[error("Session token collision")]
    TokenCollision,

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

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateUsername => ErrorKind::Conflict,
            AuthError::UserNotFound | AuthError::InvalidPassword => ErrorKind::InvalidCredentials,
            AuthError::SessionExpired => ErrorKind::Expired,
            AuthError::InvalidRole(_) | AuthError::InvalidInput(_) => ErrorKind::InvalidInput,
            AuthError::StoreUnavailable(_) => ErrorKind::Unavailable,
            AuthError::TokenCollision | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Convert to AppError
    ///
    /// `UserNotFound` and `InvalidPassword` render identically so the
    /// message does not reveal which user names exist.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::DuplicateUsername => AppError::conflict("Username already exists")
                .with_action("Please choose a different username"),
            AuthError::UserNotFound | AuthError::InvalidPassword => {
                AppError::new(self.kind(), "Invalid username or password")
            }
            AuthError::SessionExpired => AppError::new(self.kind(), "Your session has expired")
                .with_action("Please log in again"),
            AuthError::StoreUnavailable(_) => {
                AppError::unavailable("The service is temporarily unavailable")
                    .with_action("Please try again shortly")
            }
            AuthError::TokenCollision | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("An unexpected error occurred")
            }
            AuthError::InvalidRole(_) | AuthError::InvalidInput(_) => {
                AppError::invalid_input(self.to_string())
            }
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::StoreUnavailable(msg) => {
                tracing::error!(message = %msg, "Auth store unavailable");
            }
            AuthError::UserNotFound | AuthError::InvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        if classify(&err).is_unavailable() {
            AuthError::StoreUnavailable(err.to_string())
        } else {
            AuthError::Database(err)
        }
    }
}

impl From<DeadlineExceeded> for AuthError {
    fn from(err: DeadlineExceeded) -> Self {
        AuthError::StoreUnavailable(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AuthError::DuplicateUsername.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(AuthError::InvalidPassword.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(AuthError::SessionExpired.kind(), ErrorKind::Expired);
        assert_eq!(
            AuthError::InvalidRole("admin".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(AuthError::TokenCollision.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_login_failures_render_identically() {
        let a = AuthError::UserNotFound.to_app_error();
        let b = AuthError::InvalidPassword.to_app_error();
        assert_eq!(a.message(), b.message());
        assert_eq!(a.kind(), b.kind());
    }

    #[test]
    fn test_pool_timeout_becomes_store_unavailable() {
        let err = AuthError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert!(err.to_app_error().is_retryable());
    }

    #[test]
    fn test_other_sqlx_error_stays_database() {
        let err = AuthError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::Database(_)));
        assert!(err.to_app_error().is_server_error());
    }

    #[test]
    fn test_deadline_becomes_store_unavailable() {
        let err = AuthError::from(DeadlineExceeded(Duration::from_secs(5)));
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }
}
