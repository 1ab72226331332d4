//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::store::classify;
use kernel::id::UserId;
use platform::password::PasswordDigest;
use sqlx::PgPool;

use crate::domain::entity::{
    session::{Session, SessionEntry},
    user_account::{Credential, NewAccount, UserAccount},
};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::{
    display_name::DisplayName, session_token::SessionToken, user_name::UserName,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.user_name`
const USER_NAME_CONSTRAINT: &str = "users_user_name_key";

/// Primary key on `sessions.token_hash`
const SESSION_KEY_CONSTRAINT: &str = "sessions_pkey";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on `constraint` to `on_conflict`; anything else goes through `From`
fn unique_or(err: sqlx::Error, constraint: &str, on_conflict: AuthError) -> AuthError {
    if classify(&err).is_unique_on(constraint) {
        on_conflict
    } else {
        err.into()
    }
}

// ============================================================================
// Credential Store Implementation
// ============================================================================

impl CredentialStore for PgAuthRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<UserAccount> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_name, display_name, user_role)
            VALUES ($1, $2, $3)
            RETURNING user_id, user_name, display_name, user_role, created_at
            "#,
        )
        .bind(account.user_name.as_str())
        .bind(account.display_name.as_str())
        .bind(account.role.id())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_or(e, USER_NAME_CONSTRAINT, AuthError::DuplicateUsername))?;

        sqlx::query(
            r#"
            INSERT INTO credentials (user_id, password_digest)
            VALUES ($1, $2)
            "#,
        )
        .bind(row.user_id)
        .bind(account.password_digest.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_account()
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> AuthResult<Option<(UserAccount, Credential)>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                u.user_id,
                u.user_name,
                u.display_name,
                u.user_role,
                u.created_at,
                c.password_digest
            FROM users u
            JOIN credentials c ON c.user_id = u.user_id
            WHERE u.user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_pair()).transpose()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, display_name, user_role, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgAuthRepository {
    async fn insert(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.token.storage_key())
        .bind(session.user_id.as_i64())
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_or(e, SESSION_KEY_CONSTRAINT, AuthError::TokenCollision))?;

        Ok(())
    }

    async fn find_with_account(&self, token: &SessionToken) -> AuthResult<Option<SessionEntry>> {
        let row = sqlx::query_as::<_, SessionAccountRow>(
            r#"
            SELECT
                s.expires_at,
                u.user_id,
                u.user_name,
                u.display_name,
                u.user_role,
                u.created_at
            FROM sessions s
            JOIN users u ON u.user_id = s.user_id
            WHERE s.token_hash = $1
            "#,
        )
        .bind(token.storage_key())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_entry()).transpose()
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token.storage_key())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    display_name: String,
    user_role: i16,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_account(self) -> AuthResult<UserAccount> {
        let role = UserRole::from_id(self.user_role)
            .map_err(|e| AuthError::Internal(format!("Invalid user_role: {e}")))?;

        Ok(UserAccount {
            user_id: UserId::from_i64(self.user_id),
            display_name: DisplayName::from_db(self.display_name),
            user_name: UserName::from_db(self.user_name),
            role,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_digest: String,
}

impl CredentialRow {
    fn into_pair(self) -> AuthResult<(UserAccount, Credential)> {
        let account = self.user.into_account()?;
        let credential = Credential {
            user_id: account.user_id,
            password_digest: PasswordDigest::from_stored(self.password_digest),
        };
        Ok((account, credential))
    }
}

#[derive(sqlx::FromRow)]
struct SessionAccountRow {
    expires_at: DateTime<Utc>,
    #[sqlx(flatten)]
    user: UserRow,
}

impl SessionAccountRow {
    fn into_entry(self) -> AuthResult<SessionEntry> {
        Ok(SessionEntry {
            account: self.user.into_account()?,
            expires_at: self.expires_at,
        })
    }
}
