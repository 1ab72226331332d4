//! Session Registry
//!
//! Issues, validates and revokes session tokens on top of a [`SessionStore`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use kernel::id::UserId;

use crate::application::{config::AuthConfig, store_call};
use crate::domain::entity::session::{Session, SessionStatus};
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Session registry
pub struct SessionRegistry<S>
where
    S: SessionStore,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionRegistry<S>
where
    S: SessionStore + Send + Sync,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Issue a session for `user_id` that lapses after `ttl`
    ///
    /// A token collision is retried with a fresh token; running out of
    /// attempts is an internal error.
    pub async fn issue(&self, user_id: UserId, ttl: Duration) -> AuthResult<Session> {
        let ttl = to_chrono(ttl)?;
        let attempts = self.config.token_issue_attempts.max(1);

        for attempt in 1..=attempts {
            let session = Session::issue(user_id, ttl, self.config.token_bytes)?;

            match store_call(self.config.store_timeout, self.session_repo.insert(&session)).await {
                Ok(()) => return Ok(session),
                Err(AuthError::TokenCollision) => {
                    tracing::warn!(user_id = %user_id, attempt, "Session token collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AuthError::Internal(format!(
            "Could not issue a unique session token after {attempts} attempts"
        )))
    }

    /// Look up a token. Never deletes, so an expired token keeps reporting `Expired`
    pub async fn validate(&self, token: &SessionToken) -> AuthResult<SessionStatus> {
        let entry = store_call(
            self.config.store_timeout,
            self.session_repo.find_with_account(token),
        )
        .await?;

        Ok(match entry {
            None => SessionStatus::Invalid,
            Some(entry) if entry.is_expired_at(Utc::now()) => SessionStatus::Expired,
            Some(entry) => SessionStatus::Valid(entry.account),
        })
    }

    /// Delete a session. Unknown tokens are a no-op
    pub async fn revoke(&self, token: &SessionToken) -> AuthResult<()> {
        store_call(self.config.store_timeout, self.session_repo.delete(token)).await?;
        Ok(())
    }

    /// Reclaim storage held by expired sessions
    pub async fn sweep_expired(&self) -> AuthResult<u64> {
        let deleted = store_call(
            self.config.store_timeout,
            self.session_repo.delete_expired(Utc::now()),
        )
        .await?;

        tracing::info!(sessions_deleted = deleted, "Swept expired sessions");
        Ok(deleted)
    }
}

fn to_chrono(ttl: Duration) -> AuthResult<chrono::Duration> {
    chrono::Duration::from_std(ttl)
        .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))
}
