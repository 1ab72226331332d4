//! User Account Entity
//!
//! Identity of a registered user. The password digest lives in the
//! separate [`Credential`] record and never travels with the account.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::PasswordDigest;
use serde::Serialize;

use crate::domain::value_object::{
    display_name::DisplayName, user_name::UserName, user_role::UserRole,
};

/// User account entity
///
/// Immutable once created; safe to hand to outer layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
    /// Store-assigned identifier
    pub user_id: UserId,
    pub display_name: DisplayName,
    /// Unique, case-sensitive login name
    pub user_name: UserName,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Stored password digest for an account
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_digest: PasswordDigest,
}

/// Registration data handed to the credential store
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub display_name: DisplayName,
    pub user_name: UserName,
    pub password_digest: PasswordDigest,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_account_has_no_digest() {
        let account = UserAccount {
            user_id: UserId::from_i64(1),
            display_name: DisplayName::new("Alice").unwrap(),
            user_name: UserName::new("alice").unwrap(),
            role: UserRole::Student,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["user_name"], "alice");
        assert_eq!(json["role"], "student");
        assert!(json.get("password_digest").is_none());
    }
}
