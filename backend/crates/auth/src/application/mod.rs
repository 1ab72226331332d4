//! Application Layer
//!
//! Use cases and application services.

use std::future::Future;
use std::time::Duration;

use platform::deadline::with_deadline;

use crate::error::AuthResult;

pub mod config;
pub mod login;
pub mod logout;
pub mod register;
pub mod resolve_session;
pub mod service;
pub mod session_registry;

// Re-exports
pub use config::{AuthConfig, PasswordScheme};
pub use login::{LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use resolve_session::ResolveSessionUseCase;
pub use service::{AuthService, LocalSessionResolver, SessionResolver};
pub use session_registry::SessionRegistry;

/// Run a store call under the configured deadline
///
/// An elapsed deadline surfaces as `StoreUnavailable`.
pub(crate) async fn store_call<T>(
    limit: Duration,
    call: impl Future<Output = AuthResult<T>>,
) -> AuthResult<T> {
    with_deadline(limit, call).await?
}
