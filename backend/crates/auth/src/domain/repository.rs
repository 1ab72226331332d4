//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{
    session::{Session, SessionEntry},
    user_account::{Credential, NewAccount, UserAccount},
};
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Create a new account
    ///
    /// Fails with `DuplicateUsername` if the user name is taken. The check
    /// and the insert are one atomic step.
    async fn create(&self, account: &NewAccount) -> AuthResult<UserAccount>;

    /// Find account and credential by user name (exact, case-sensitive)
    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> AuthResult<Option<(UserAccount, Credential)>>;

    /// Find account by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<UserAccount>>;
}

/// Session store trait
///
/// Sessions are keyed by [`SessionToken::storage_key`], never by the raw token.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Persist a new session; `TokenCollision` if the key already exists
    async fn insert(&self, session: &Session) -> AuthResult<()>;

    /// Find session joined with its owning account
    async fn find_with_account(&self, token: &SessionToken) -> AuthResult<Option<SessionEntry>>;

    /// Delete a session; `false` if there was nothing to delete
    async fn delete(&self, token: &SessionToken) -> AuthResult<bool>;

    /// Delete sessions with `expires_at <= now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
