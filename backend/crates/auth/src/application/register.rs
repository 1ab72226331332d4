//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::{config::AuthConfig, store_call};
use crate::domain::entity::user_account::{NewAccount, UserAccount};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    display_name::DisplayName, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub display_name: String,
    pub user_name: String,
    pub password: ClearTextPassword,
    /// `"teacher"` or `"student"`
    pub role: String,
}

/// Register use case
pub struct RegisterUseCase<C>
where
    C: CredentialStore,
{
    credential_repo: Arc<C>,
    hasher: Arc<dyn PasswordHasher>,
    config: Arc<AuthConfig>,
}

impl<C> RegisterUseCase<C>
where
    C: CredentialStore + Send + Sync,
{
    pub fn new(
        credential_repo: Arc<C>,
        hasher: Arc<dyn PasswordHasher>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            credential_repo,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserAccount> {
        let role = UserRole::from_code(&input.role)
            .map_err(|_| AuthError::InvalidRole(input.role.clone()))?;
        let display_name = DisplayName::new(&input.display_name)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        let password_digest = self.hasher.digest(&input.password)?;

        let account = store_call(
            self.config.store_timeout,
            self.credential_repo.create(&NewAccount {
                display_name,
                user_name,
                password_digest,
                role,
            }),
        )
        .await?;

        tracing::info!(
            user_id = %account.user_id,
            user_name = %account.user_name,
            role = %account.role,
            "User registered"
        );

        Ok(account)
    }
}
