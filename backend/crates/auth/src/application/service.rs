//! Auth Service
//!
//! The single entry point outer layers use. Stores and the registry stay
//! behind this facade; quiz workflows depend only on [`SessionResolver`].

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::{
    config::AuthConfig,
    login::{LoginInput, LoginUseCase},
    logout::LogoutUseCase,
    register::{RegisterInput, RegisterUseCase},
    resolve_session::ResolveSessionUseCase,
    session_registry::SessionRegistry,
};
use crate::domain::entity::{session::Session, user_account::UserAccount};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::error::{AuthError, AuthResult};

/// Plaintext behind the digest verified when a login names an unknown user
const DUMMY_PASSWORD: &str = "timing-equalizer-not-a-real-credential";

/// Resolves a bearer token to the account it belongs to
#[trait_variant::make(SessionResolver: Send)]
pub trait LocalSessionResolver {
    /// `Ok(None)` when unauthenticated, `Err(SessionExpired)` when lapsed
    async fn resolve_session(&self, token: &str) -> AuthResult<Option<UserAccount>>;
}

/// Auth service
pub struct AuthService<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    register: RegisterUseCase<C>,
    login: LoginUseCase<C, S>,
    resolve_session: ResolveSessionUseCase<S>,
    logout: LogoutUseCase<S>,
    registry: Arc<SessionRegistry<S>>,
}

impl<C, S> AuthService<C, S>
where
    C: CredentialStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    /// Wire the use cases over the given stores
    ///
    /// Fails if the configured password scheme cannot be built.
    pub fn new(credentials: Arc<C>, sessions: Arc<S>, config: Arc<AuthConfig>) -> AuthResult<Self> {
        let hasher = config.build_hasher()?;
        let dummy_digest = hasher.digest(&ClearTextPassword::new(DUMMY_PASSWORD))?;
        let registry = Arc::new(SessionRegistry::new(sessions, config.clone()));

        Ok(Self {
            register: RegisterUseCase::new(credentials.clone(), hasher.clone(), config.clone()),
            login: LoginUseCase::new(
                credentials,
                registry.clone(),
                hasher,
                dummy_digest,
                config,
            ),
            resolve_session: ResolveSessionUseCase::new(registry.clone()),
            logout: LogoutUseCase::new(registry.clone()),
            registry,
        })
    }

    /// Register a new account
    ///
    /// `role` must be `"teacher"` or `"student"`.
    pub async fn register(
        &self,
        display_name: &str,
        user_name: &str,
        password: ClearTextPassword,
        role: &str,
    ) -> AuthResult<UserAccount> {
        self.register
            .execute(RegisterInput {
                display_name: display_name.to_string(),
                user_name: user_name.to_string(),
                password,
                role: role.to_string(),
            })
            .await
            .inspect_err(AuthError::log)
    }

    /// Verify credentials and issue a session
    pub async fn login(&self, user_name: &str, password: ClearTextPassword) -> AuthResult<Session> {
        self.login
            .execute(LoginInput {
                user_name: user_name.to_string(),
                password,
            })
            .await
            .inspect_err(AuthError::log)
    }

    /// Resolve a token to its account
    pub async fn resolve_session(&self, token: &str) -> AuthResult<Option<UserAccount>> {
        self.resolve_session
            .execute(token)
            .await
            .inspect_err(AuthError::log)
    }

    /// Invalidate a token
    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        self.logout.execute(token).await.inspect_err(AuthError::log)
    }

    /// Delete expired sessions; returns how many were removed
    pub async fn sweep_expired(&self) -> AuthResult<u64> {
        self.registry
            .sweep_expired()
            .await
            .inspect_err(AuthError::log)
    }
}

impl<C, S> SessionResolver for AuthService<C, S>
where
    C: CredentialStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    async fn resolve_session(&self, token: &str) -> AuthResult<Option<UserAccount>> {
        AuthService::resolve_session(self, token).await
    }
}
