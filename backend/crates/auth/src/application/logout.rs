//! Logout Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::session_registry::SessionRegistry;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    registry: Arc<SessionRegistry<S>>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore + Send + Sync,
{
    pub fn new(registry: Arc<SessionRegistry<S>>) -> Self {
        Self { registry }
    }

    /// Idempotent: malformed, unknown and already revoked tokens succeed
    pub async fn execute(&self, raw_token: &str) -> AuthResult<()> {
        let Some(token) = SessionToken::parse(raw_token) else {
            return Ok(());
        };

        self.registry.revoke(&token).await?;

        tracing::info!("User logged out");
        Ok(())
    }
}
