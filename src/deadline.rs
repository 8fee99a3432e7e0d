//! Overall run deadline.
//!
//! A [`Deadline`] is armed once, when a run starts, and is never reset between
//! attempts. The timer lives inside the executor future, so it is released on
//! every exit path: success, exhaustion, expiry, a panic in the operation, or
//! the caller dropping the future.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep};

/// Which timer won a [`Deadline::race`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Race {
    /// The per-attempt delay ran out first; the next attempt may start.
    Elapsed,
    /// The overall deadline passed first.
    Expired,
}

/// A cancellable timer bounding the total wall-clock time of one run.
///
/// Must be created inside a tokio runtime.
///
/// # Examples
///
/// ```rust
/// use retrier::{Deadline, Race};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let mut deadline = Deadline::start(Duration::from_millis(5));
/// assert!(!deadline.is_expired());
///
/// // The one second pause loses to the five millisecond deadline.
/// assert_eq!(deadline.race(Duration::from_secs(1)).await, Race::Expired);
/// assert!(deadline.is_expired());
/// # });
/// ```
#[derive(Debug)]
pub struct Deadline {
    timer: Pin<Box<Sleep>>,
    timeout: Duration,
}

impl Deadline {
    /// Arm a deadline `timeout` from now.
    pub fn start(timeout: Duration) -> Self {
        Self {
            timer: Box::pin(tokio::time::sleep(timeout)),
            timeout,
        }
    }

    /// The timeout this deadline was armed with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The instant at which the deadline passes.
    pub fn instant(&self) -> Instant {
        self.timer.deadline()
    }

    /// Whether the deadline has passed. Never blocks.
    ///
    /// A zero timeout is expired as soon as it is checked.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.timer.deadline()
    }

    /// Time left before the deadline passes, or zero once it has.
    pub fn remaining(&self) -> Duration {
        self.timer
            .deadline()
            .saturating_duration_since(Instant::now())
    }

    /// Wait until either `delay` elapses or the deadline passes, whichever
    /// comes first.
    ///
    /// The deadline is polled first, so it wins when both are ready. The
    /// delay timer is dropped as soon as this returns; the deadline timer
    /// stays armed for later races.
    pub async fn race(&mut self, delay: Duration) -> Race {
        tokio::select! {
            biased;
            () = &mut self.timer => Race::Expired,
            () = tokio::time::sleep(delay) => Race::Elapsed,
        }
    }
}
