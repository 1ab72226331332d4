//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the [`AuthService`] facade
//! - `infra/` - PostgreSQL and in-memory implementations
//!
//! ## Features
//! - Registration with user name, display name, password and role (teacher / student)
//! - Login issuing opaque bearer session tokens with a fixed TTL
//! - Session resolution distinguishing unknown, expired and valid tokens
//! - Logout and sweeping of expired sessions
//!
//! ## Security Model
//! - Passwords hashed with Argon2id by default; legacy unsalted SHA-256 on request
//! - Tokens drawn from the OS CSPRNG; only their SHA-256 is stored
//! - Unknown-user logins still pay for one password verification

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::config::{AuthConfig, PasswordScheme};
pub use application::service::{AuthService, LocalSessionResolver, SessionResolver};
pub use domain::entity::{
    session::{Session, SessionStatus},
    user_account::UserAccount,
};
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use platform::password::ClearTextPassword;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
