//! Failure types for the retry executor and the condition poller

use std::time::Duration;
use thiserror::Error;

/// Returned when `retry` exhausts its attempt budget.
///
/// Wraps the error observed on the final attempt; earlier errors are
/// reported through the retry hook as they happen.
#[derive(Debug, Error)]
#[error("operation failed after {attempts} attempt(s): {last_error}")]
pub struct OperationFailure<E> {
    /// Number of attempts made (equals the effective `max_attempts`).
    pub attempts: u32,

    /// Error from the final attempt.
    pub last_error: E,
}

impl<E> OperationFailure<E> {
    /// Consume the failure and return the final attempt's error.
    pub fn into_last_error(self) -> E {
        self.last_error
    }
}

/// Returned when a poll loop reaches its deadline without the condition
/// becoming true. Carries the configured deadline, not the measured
/// elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("condition not met within {timeout:?}")]
pub struct TimeoutFailure {
    /// The poll deadline that was exceeded.
    pub timeout: Duration,
}
