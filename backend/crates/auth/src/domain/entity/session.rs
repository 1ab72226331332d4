//! Session Entity
//!
//! A bearer token bound to one user until `expires_at`.
//! Expiry is evaluated lazily on lookup; nothing deletes a session when it lapses.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;

use crate::domain::entity::user_account::UserAccount;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Issued session
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token returned to the client
    pub token: SessionToken,
    pub user_id: UserId,
    /// Absolute expiry (UTC)
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with a fresh token
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    /// A TTL that pushes the expiry past the representable range is an internal error.
    pub fn issue(user_id: UserId, ttl: Duration, token_bytes: usize) -> AuthResult<Self> {
        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            AuthError::Internal(format!("Session TTL out of range: {}s", ttl.num_seconds()))
        })?;

        Ok(Self {
            token: SessionToken::generate(token_bytes),
            user_id,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// A stored session joined with its owning account
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub account: UserAccount,
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// Outcome of validating a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Record exists and has not expired
    Valid(UserAccount),
    /// No record: never issued, or revoked
    Invalid,
    /// Record exists but `now >= expires_at`
    Expired,
}

/// A session is expired from the instant `now` reaches `expires_at`
fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}
