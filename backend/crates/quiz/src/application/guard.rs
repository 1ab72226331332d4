//! Session Guard
//!
//! Resolves the caller's token and checks the role an operation requires.

use std::sync::Arc;

use auth::{SessionResolver, UserAccount, UserRole};

use crate::error::{QuizError, QuizResult};

/// Role gate shared by the quiz use cases
pub struct SessionGuard<A> {
    resolver: Arc<A>,
}

impl<A> Clone for SessionGuard<A> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<A> SessionGuard<A>
where
    A: SessionResolver + Send + Sync,
{
    pub fn new(resolver: Arc<A>) -> Self {
        Self { resolver }
    }

    /// Any signed-in user
    pub async fn signed_in(&self, token: &str) -> QuizResult<UserAccount> {
        self.resolver
            .resolve_session(token)
            .await?
            .ok_or(QuizError::Unauthenticated)
    }

    /// A signed-in user holding `role`
    pub async fn require(&self, token: &str, role: UserRole) -> QuizResult<UserAccount> {
        let account = self.signed_in(token).await?;
        if account.role != role {
            tracing::warn!(
                user_id = %account.user_id,
                role = %account.role,
                required = %role,
                "Role check failed"
            );
            return Err(QuizError::Forbidden);
        }
        Ok(account)
    }
}
