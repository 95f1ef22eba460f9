//! Retry-with-backoff executor
//!
//! Repeatedly invokes a fallible async operation until it succeeds or
//! the attempt budget is exhausted, sleeping between attempts with a
//! multiplicative backoff. Execution is fully sequential; the only
//! suspension point is the inter-attempt delay.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::OperationFailure;

/// Backoff policy for [`retry`] and [`retry_with_hook`].
///
/// Passed by reference per call and never persisted. Construct with
/// struct-update syntax:
///
/// ```
/// use std::time::Duration;
/// use testlab_core::RetryPolicy;
///
/// let policy = RetryPolicy {
///     max_attempts: 5,
///     initial_delay: Duration::from_millis(50),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first attempt. Values below 1
    /// are treated as 1.
    pub max_attempts: u32,

    /// Delay before the second attempt.
    pub initial_delay: Duration,

    /// Multiplicative growth factor applied to the delay after each
    /// failed attempt. Values below 1.0 are treated as 1.0.
    pub backoff_multiplier: f64,

    /// Upper bound on any single inter-attempt delay.
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    /// Delay slept after the failure of `attempt` (1-indexed):
    /// `initial_delay * backoff_multiplier^(attempt - 1)`, clamped to
    /// `max_delay` when one is set.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = self.backoff_multiplier.max(1.0);
        let millis = self.initial_delay.as_millis() as f64 * factor.powi(exponent as i32);
        // `as u64` saturates on overflow, so unbounded growth stays finite
        let mut delay = Duration::from_millis(millis as u64);
        if let Some(cap) = self.max_delay {
            delay = delay.min(cap);
        }
        delay
    }

    fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Run `operation` until it succeeds or the policy's attempt budget is
/// exhausted.
///
/// Attempt 1 runs immediately. On success the value is returned at once
/// with no further delay. After the final failed attempt the last
/// observed error is propagated inside [`OperationFailure`].
pub async fn retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation: F,
) -> Result<T, OperationFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_with_hook(policy, operation, |_, _| {}).await
}

/// Like [`retry`], invoking `on_retry(attempt, &error)` once per
/// failed-but-retried attempt, before the backoff sleep.
///
/// `attempt` is 1-indexed; for `max_attempts = 3` the hook observes
/// attempts 1 and 2, never 3; the final failure is returned to the
/// caller instead.
pub async fn retry_with_hook<F, Fut, T, E, H>(
    policy: &RetryPolicy,
    mut operation: F,
    mut on_retry: H,
) -> Result<T, OperationFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    H: FnMut(u32, &E),
{
    let max_attempts = policy.effective_attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("Operation succeeded on attempt {}/{}", attempt, max_attempts);
                }
                return Ok(value);
            }
            Err(error) if attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                debug!(
                    "Operation failed (attempt {}/{}), retrying after {:?}",
                    attempt, max_attempts, delay
                );
                on_retry(attempt, &error);
                sleep(delay).await;
                attempt += 1;
            }
            Err(error) => {
                warn!("Operation failed on all {} attempt(s)", max_attempts);
                return Err(OperationFailure { attempts: max_attempts, last_error: error });
            }
        }
    }
}
