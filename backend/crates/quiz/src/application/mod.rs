//! Application Layer
//!
//! Session-protected quiz workflows.

use std::future::Future;
use std::time::Duration;

use platform::deadline::with_deadline;

use crate::error::QuizResult;

pub mod attempt;
pub mod authoring;
pub mod config;
pub mod guard;
pub mod review;
pub mod service;

// Re-exports
pub use attempt::AttemptUseCase;
pub use authoring::AuthoringUseCase;
pub use config::QuizConfig;
pub use guard::SessionGuard;
pub use review::ReviewUseCase;
pub use service::QuizService;

/// Run a store call under the configured deadline
pub(crate) async fn store_call<T>(
    limit: Duration,
    call: impl Future<Output = QuizResult<T>>,
) -> QuizResult<T> {
    with_deadline(limit, call).await?
}
