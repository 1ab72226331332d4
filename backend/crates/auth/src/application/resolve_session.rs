//! Resolve Session Use Case
//!
//! Maps a bearer token to the account it was issued for.

use std::sync::Arc;

use crate::application::session_registry::SessionRegistry;
use crate::domain::entity::{session::SessionStatus, user_account::UserAccount};
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<S>
where
    S: SessionStore,
{
    registry: Arc<SessionRegistry<S>>,
}

impl<S> ResolveSessionUseCase<S>
where
    S: SessionStore + Send + Sync,
{
    pub fn new(registry: Arc<SessionRegistry<S>>) -> Self {
        Self { registry }
    }

    /// `Ok(None)` for empty, malformed, unknown or revoked tokens;
    /// `Err(SessionExpired)` once the session has lapsed.
    pub async fn execute(&self, raw_token: &str) -> AuthResult<Option<UserAccount>> {
        let Some(token) = SessionToken::parse(raw_token) else {
            return Ok(None);
        };

        match self.registry.validate(&token).await? {
            SessionStatus::Valid(account) => Ok(Some(account)),
            SessionStatus::Invalid => Ok(None),
            SessionStatus::Expired => Err(AuthError::SessionExpired),
        }
    }
}
