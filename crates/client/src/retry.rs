//! Count-bounded retry for view fetches.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Retry policy: `attempts` total tries, a fixed `delay` apart.
///
/// Count-bounded, not time-bounded, and unconditional on error type: a 4xx is
/// retried exactly like a transport failure. When attempts are exhausted the
/// last error is returned so the caller can surface it in a persistent
/// dialog; terminal failure is never swallowed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    /// Three attempts spaced one second apart.
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Run `op` until it succeeds or the policy's attempts are exhausted.
pub async fn fetch_with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                tracing::warn!(attempt, max = attempts, error = %err, "fetch attempt failed; retrying");
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => {
                tracing::warn!(attempt, max = attempts, error = %err, "fetch failed; giving up");
                return Err(err);
            }
        }
    }
}
