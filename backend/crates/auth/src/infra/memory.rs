//! In-Memory Repository Implementations
//!
//! Backs tests and embedded use. Every operation runs under one lock
//! acquisition, so check-then-insert is atomic.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use tokio::sync::Mutex;

use crate::domain::entity::{
    session::{Session, SessionEntry},
    user_account::{Credential, NewAccount, UserAccount},
};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    last_user_id: i64,
    users: HashMap<UserId, UserAccount>,
    credentials: HashMap<UserId, Credential>,
    user_ids_by_name: HashMap<String, UserId>,
    /// Keyed by token storage key
    sessions: HashMap<String, StoredSession>,
}

struct StoredSession {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }
}

// ============================================================================
// Credential Store Implementation
// ============================================================================

impl CredentialStore for MemoryAuthRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<UserAccount> {
        let mut state = self.state.lock().await;

        if state
            .user_ids_by_name
            .contains_key(account.user_name.as_str())
        {
            return Err(AuthError::DuplicateUsername);
        }

        state.last_user_id += 1;
        let user_id = UserId::from_i64(state.last_user_id);

        let created = UserAccount {
            user_id,
            display_name: account.display_name.clone(),
            user_name: account.user_name.clone(),
            role: account.role,
            created_at: Utc::now(),
        };

        state
            .user_ids_by_name
            .insert(account.user_name.as_str().to_string(), user_id);
        state.credentials.insert(
            user_id,
            Credential {
                user_id,
                password_digest: account.password_digest.clone(),
            },
        );
        state.users.insert(user_id, created.clone());

        Ok(created)
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> AuthResult<Option<(UserAccount, Credential)>> {
        let state = self.state.lock().await;

        let found = state
            .user_ids_by_name
            .get(user_name.as_str())
            .and_then(|id| Some((state.users.get(id)?, state.credentials.get(id)?)))
            .map(|(account, credential)| (account.clone(), credential.clone()));

        Ok(found)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<UserAccount>> {
        Ok(self.state.lock().await.users.get(&user_id).cloned())
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for MemoryAuthRepository {
    async fn insert(&self, session: &Session) -> AuthResult<()> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(&session.user_id) {
            return Err(AuthError::Internal(format!(
                "Session for unknown user {}",
                session.user_id
            )));
        }

        let key = session.token.storage_key();
        if state.sessions.contains_key(&key) {
            return Err(AuthError::TokenCollision);
        }

        state.sessions.insert(
            key,
            StoredSession {
                user_id: session.user_id,
                expires_at: session.expires_at,
            },
        );
        Ok(())
    }

    async fn find_with_account(&self, token: &SessionToken) -> AuthResult<Option<SessionEntry>> {
        let state = self.state.lock().await;

        let entry = state
            .sessions
            .get(&token.storage_key())
            .and_then(|stored| {
                state.users.get(&stored.user_id).map(|account| SessionEntry {
                    account: account.clone(),
                    expires_at: stored.expires_at,
                })
            });

        Ok(entry)
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.sessions.remove(&token.storage_key()).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, stored| stored.expires_at > now);
        Ok((before - state.sessions.len()) as u64)
    }
}
