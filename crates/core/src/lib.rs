//! Testlab Core
//!
//! Shared building blocks for the testlab suite: a retry-with-backoff
//! executor and a condition poller. Both are plain in-process helpers
//! that wrap caller-supplied operations; the only suspension points are
//! the explicit delays between attempts and polls.

pub mod error;
pub mod retry;
pub mod wait;

// Re-export commonly used types
pub use error::{OperationFailure, TimeoutFailure};
pub use retry::{retry, retry_with_hook, RetryPolicy};
pub use wait::{wait_until, wait_until_ok, PollPolicy};

/// Testlab version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
