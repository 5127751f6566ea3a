//! Retry-with-backoff for webhook delivery.
//!
//! Each attempt reports an [`AttemptOutcome`]; the driver only decides whether
//! to wait and try again.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::NotifyError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before retry `n` is `base_delay * 2^n`, with `n` starting at 1.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Wait after the `failures`-th failed attempt (1-based).
    pub fn delay_after(&self, failures: u32) -> Duration {
        let multiplier = 1u32.checked_shl(failures).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(multiplier)
    }
}

/// Result of one attempt.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    /// Delivered; stop.
    Success(T),
    /// Will never succeed (e.g. 4xx); stop without retrying.
    Permanent(NotifyError),
    /// Network failure, timeout, or an unexpected status; may be retried.
    Transient(NotifyError),
}

/// Run `operation` until it succeeds, fails permanently, or the attempt
/// budget is spent. The closure receives the 1-based attempt number.
pub async fn retry<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T, NotifyError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AttemptOutcome<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            AttemptOutcome::Success(value) => return Ok(value),
            AttemptOutcome::Permanent(err) => return Err(err),
            AttemptOutcome::Transient(err) => {
                if !err.is_retryable() || attempt >= max_attempts {
                    return Err(err);
                }
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt,
                    max = max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retryable delivery failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
