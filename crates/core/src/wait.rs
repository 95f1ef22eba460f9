//! Condition poller ("wait until")
//!
//! Polls a caller-supplied predicate on a fixed interval until it turns
//! true or a deadline elapses.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::TimeoutFailure;

/// Deadline and cadence for [`wait_until`] / [`wait_until_ok`].
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Total time the condition may take before the wait fails.
    pub timeout: Duration,

    /// Sleep between predicate evaluations.
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            interval: Duration::from_millis(100),
        }
    }
}

/// Poll `predicate` until it returns true.
///
/// The predicate is evaluated immediately; a true result returns without
/// sleeping at all. Once the elapsed time reaches the policy's timeout
/// the wait fails with a [`TimeoutFailure`] carrying the configured
/// deadline.
pub async fn wait_until<F, Fut>(policy: &PollPolicy, mut predicate: F) -> Result<(), TimeoutFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        polls += 1;
        if predicate().await {
            if polls > 1 {
                debug!("Condition met after {} poll(s) ({:?})", polls, start.elapsed());
            }
            return Ok(());
        }
        if start.elapsed() >= policy.timeout {
            warn!("Condition not met after {} poll(s) within {:?}", polls, policy.timeout);
            return Err(TimeoutFailure { timeout: policy.timeout });
        }
        sleep(policy.interval).await;
    }
}

/// Poll a fallible predicate until it returns `Ok(true)`.
///
/// An `Err` from the predicate counts as "not yet true": it is logged at
/// debug level and polling continues until the deadline. Callers who
/// want predicate errors to propagate should use [`wait_until`] with an
/// infallible predicate instead.
pub async fn wait_until_ok<F, Fut, E>(
    policy: &PollPolicy,
    mut predicate: F,
) -> Result<(), TimeoutFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: fmt::Display,
{
    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        polls += 1;
        match predicate().await {
            Ok(true) => {
                if polls > 1 {
                    debug!("Condition met after {} poll(s) ({:?})", polls, start.elapsed());
                }
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => {
                debug!("Predicate not ready on poll {}: {}", polls, e);
            }
        }
        if start.elapsed() >= policy.timeout {
            warn!("Condition not met after {} poll(s) within {:?}", polls, policy.timeout);
            return Err(TimeoutFailure { timeout: policy.timeout });
        }
        sleep(policy.interval).await;
    }
}
