//! Login Use Case
//!
//! Authenticates a user and issues a session.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordDigest, PasswordHasher};

use crate::application::{config::AuthConfig, session_registry::SessionRegistry, store_call};
use crate::domain::entity::session::Session;
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: ClearTextPassword,
}

/// Login use case
pub struct LoginUseCase<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    credential_repo: Arc<C>,
    registry: Arc<SessionRegistry<S>>,
    hasher: Arc<dyn PasswordHasher>,
    /// Verified against on the unknown-user path so both paths cost one hash
    dummy_digest: PasswordDigest,
    config: Arc<AuthConfig>,
}

impl<C, S> LoginUseCase<C, S>
where
    C: CredentialStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    pub fn new(
        credential_repo: Arc<C>,
        registry: Arc<SessionRegistry<S>>,
        hasher: Arc<dyn PasswordHasher>,
        dummy_digest: PasswordDigest,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            credential_repo,
            registry,
            hasher,
            dummy_digest,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<Session> {
        let found = match UserName::new(&input.user_name) {
            Ok(user_name) => {
                store_call(
                    self.config.store_timeout,
                    self.credential_repo.find_by_user_name(&user_name),
                )
                .await?
            }
            Err(_) => None,
        };

        let Some((account, credential)) = found else {
            let _ = self.hasher.verify(&input.password, &self.dummy_digest);
            return Err(AuthError::UserNotFound);
        };

        if !self
            .hasher
            .verify(&input.password, &credential.password_digest)
        {
            return Err(AuthError::InvalidPassword);
        }

        let session = self
            .registry
            .issue(account.user_id, self.config.session_ttl)
            .await?;

        tracing::info!(
            user_id = %account.user_id,
            expires_at = %session.expires_at,
            "User logged in"
        );

        Ok(session)
    }
}
