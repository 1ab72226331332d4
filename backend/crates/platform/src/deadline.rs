//! Deadlines for store calls
//!
//! Every call into a backing store is bounded so a stalled store surfaces
//! as an error instead of hanging the caller.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The wrapped call did not finish in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("store call exceeded {0:?}")]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut`, failing with [`DeadlineExceeded`] once `limit` elapses
pub async fn with_deadline<F, T>(limit: Duration, fut: F) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| DeadlineExceeded(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let out = with_deadline(Duration::from_secs(1), async { 7 }).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let limit = Duration::from_millis(50);
        let out = with_deadline(limit, tokio::time::sleep(Duration::from_secs(10))).await;
        assert_eq!(out, Err(DeadlineExceeded(limit)));
    }
}
