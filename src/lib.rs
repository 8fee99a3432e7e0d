//! # Retrier
//!
//! An async retry executor: run an operation, and when it fails run it again
//! under a backoff policy until it succeeds, the attempt cap is reached, or
//! the overall timeout passes.
//!
//! ## Quick Example
//!
//! ```rust
//! use retrier::{execute, Policy};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! // Start from a preset and override what you need.
//! let policy = Policy::exponential()
//!     .with_base(Duration::from_millis(10))
//!     .with_max_attempts(5)
//!     .with_timeout(Duration::from_secs(2));
//!
//! let result = execute(|| async { Ok::<_, std::io::Error>("connected") }, policy).await;
//! assert_eq!(result.unwrap(), "connected");
//! # });
//! ```
//!
//! ## Semantics
//!
//! - The delay after the failure of attempt `i` (0-based) is
//!   `base * multiplier^i`. The first retry waits `base`; no pause follows the
//!   final attempt.
//! - With `jitter` on, each pause is drawn uniformly from `[1ms, delay]`.
//! - The timeout is measured from the start of the run and never reset. The
//!   first attempt always runs; after each failure an expired deadline ends
//!   the run, and a deadline passing during a pause cuts the pause short.
//! - Failures come back as [`RetryError`], which tells a timeout apart from
//!   running out of attempts and always carries the last operation error.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod deadline;
pub mod delay;
pub mod error;
pub mod executor;
pub mod policy;
pub mod retryable;

// Re-exports
pub use deadline::{Deadline, Race};
pub use delay::{delay, delay_with_rng, raw_delay};
pub use error::{ErrorKind, RetryError};
pub use executor::{execute, execute_void, Retrier};
pub use policy::{
    constant_backoff, default_policy, exponential_backoff, Policy, DEFAULT_ATTEMPTS,
    DEFAULT_TIMEOUT,
};
pub use retryable::Retryable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{ErrorKind, RetryError};
    pub use crate::executor::{execute, execute_void, Retrier};
    pub use crate::policy::{constant_backoff, default_policy, exponential_backoff, Policy};
    pub use crate::retryable::Retryable;
}
