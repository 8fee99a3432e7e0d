//! The retry loop.
//!
//! A run invokes the operation, and after each failure:
//!
//! 1. gives up with [`ErrorKind::TimeoutExceeded`] if the deadline has
//!    already passed,
//! 2. gives up with [`ErrorKind::MaxAttemptsReached`] if that was the last
//!    allowed attempt (no pause follows the final attempt),
//! 3. otherwise waits for the computed delay, unless the deadline passes
//!    first.
//!
//! Invocations within a run are strictly sequential. Runs share no state, so
//! any number of them may proceed concurrently.

use tokio::time::Instant;

use crate::deadline::{Deadline, Race};
use crate::delay::delay;
use crate::error::{ErrorKind, RetryError};
use crate::policy::Policy;
use crate::retryable::Retryable;

/// Run `operation` under `policy` until it succeeds, runs out of attempts,
/// or the policy's timeout passes.
///
/// The first invocation always happens, even with a zero timeout. Whatever
/// the outcome, the last operation error is kept in the returned
/// [`RetryError`].
///
/// # Examples
///
/// ```rust
/// use retrier::{execute, Policy};
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let calls = AtomicU32::new(0);
/// let policy = Policy::constant(Duration::from_millis(1)).with_max_attempts(5);
///
/// let value = execute(
///     || {
///         let n = calls.fetch_add(1, Ordering::SeqCst);
///         async move { if n < 2 { Err("not yet") } else { Ok("ready") } }
///     },
///     policy,
/// )
/// .await;
///
/// assert_eq!(value, Ok("ready"));
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// # });
/// ```
pub async fn execute<R>(
    mut operation: R,
    policy: Policy,
) -> Result<R::Output, RetryError<R::Error>>
where
    R: Retryable,
{
    let start = Instant::now();
    let mut deadline = Deadline::start(policy.timeout);
    let max_attempts = policy.effective_attempts();
    let mut attempt = 0u32;

    loop {
        let error = match operation.attempt().await {
            Ok(value) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(attempts = attempt + 1, "operation succeeded");
                return Ok(value);
            }
            Err(error) => error,
        };
        let attempts = attempt + 1;

        if deadline.is_expired() {
            return Err(give_up(ErrorKind::TimeoutExceeded, error, attempts, start));
        }
        if attempts >= max_attempts {
            return Err(give_up(
                ErrorKind::MaxAttemptsReached,
                error,
                attempts,
                start,
            ));
        }

        let pause = delay(&policy, attempt);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt = attempts,
            delay = ?pause,
            remaining = ?deadline.remaining(),
            "attempt failed, retrying"
        );

        if deadline.race(pause).await == Race::Expired {
            return Err(give_up(ErrorKind::TimeoutExceeded, error, attempts, start));
        }
        attempt = attempts;
    }
}

/// Run an operation whose success carries no value.
///
/// Thin wrapper over [`execute`] for `Output = ()`.
pub async fn execute_void<R>(operation: R, policy: Policy) -> Result<(), RetryError<R::Error>>
where
    R: Retryable<Output = ()>,
{
    execute(operation, policy).await
}

fn give_up<E>(kind: ErrorKind, last_error: E, attempts: u32, start: Instant) -> RetryError<E> {
    let elapsed = start.elapsed();

    #[cfg(feature = "tracing")]
    tracing::warn!(%kind, attempts, ?elapsed, "giving up");

    RetryError::new(kind, last_error, attempts, elapsed)
}

/// A reusable handle that runs operations under one policy.
///
/// `Retrier` is `Copy` and holds no run state, so one instance can be shared
/// by any number of concurrent calls.
///
/// # Examples
///
/// ```rust
/// use retrier::{Policy, Retrier};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let retrier = Retrier::new(
///     Policy::constant(Duration::from_millis(1)).with_max_attempts(2),
/// );
///
/// let err = retrier
///     .run_void(|| async { Err::<(), _>("disk full") })
///     .await
///     .unwrap_err();
/// assert!(err.is_max_attempts());
///
/// assert_eq!(retrier.run(|| async { Ok::<_, ()>(7) }).await, Ok(7));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Retrier {
    policy: Policy,
}

impl Retrier {
    /// Create a retrier that uses `policy` for every run.
    pub const fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy applied to each run.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Run `operation`. See [`execute`].
    pub async fn run<R>(&self, operation: R) -> Result<R::Output, RetryError<R::Error>>
    where
        R: Retryable,
    {
        execute(operation, self.policy).await
    }

    /// Run an operation without a success value. See [`execute_void`].
    pub async fn run_void<R>(&self, operation: R) -> Result<(), RetryError<R::Error>>
    where
        R: Retryable<Output = ()>,
    {
        execute_void(operation, self.policy).await
    }
}

impl From<Policy> for Retrier {
    fn from(policy: Policy) -> Self {
        Self::new(policy)
    }
}
