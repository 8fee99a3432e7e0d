//! Error types for retry runs.

use std::time::Duration;

/// Why a run stopped without a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The overall deadline passed before another attempt could start.
    TimeoutExceeded,
    /// Every allowed attempt failed before the deadline.
    MaxAttemptsReached,
}

impl ErrorKind {
    /// A short stable label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeoutExceeded => "timeout exceeded",
            Self::MaxAttemptsReached => "max attempts reached",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ErrorKind {}

/// Error returned when a run ends without a success.
///
/// Carries both the terminal [`ErrorKind`] and the error from the last
/// attempt, so callers can branch on why the run stopped and still inspect
/// what actually went wrong. The last error is also exposed as
/// [`std::error::Error::source`].
///
/// # Examples
///
/// ```rust
/// use retrier::{execute, ErrorKind, Policy};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let policy = Policy::constant(Duration::from_millis(1)).with_max_attempts(3);
///
/// let err = execute(|| async { Err::<(), _>("connection refused") }, policy)
///     .await
///     .unwrap_err();
///
/// assert!(err.is_max_attempts());
/// assert_eq!(err.kind(), ErrorKind::MaxAttemptsReached);
/// assert_eq!(err.last_error, "connection refused");
/// assert_eq!(err.attempts, 3);
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryError<E> {
    /// Why the run stopped.
    pub kind: ErrorKind,
    /// The error from the final attempt.
    pub last_error: E,
    /// Number of times the operation was invoked.
    pub attempts: u32,
    /// Time from the start of the run until it gave up.
    pub elapsed: Duration,
}

impl<E> RetryError<E> {
    /// Create a new RetryError.
    pub fn new(kind: ErrorKind, last_error: E, attempts: u32, elapsed: Duration) -> Self {
        Self {
            kind,
            last_error,
            attempts,
            elapsed,
        }
    }

    /// The terminal kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns true if the run stopped because its deadline passed.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::TimeoutExceeded
    }

    /// Returns true if the run used up every attempt.
    pub fn is_max_attempts(&self) -> bool {
        self.kind == ErrorKind::MaxAttemptsReached
    }

    /// Get a reference to the last operation error.
    pub fn last_error(&self) -> &E {
        &self.last_error
    }

    /// Extract the last operation error, discarding metadata.
    pub fn into_inner(self) -> E {
        self.last_error
    }

    /// Transform the last operation error, keeping kind and metadata.
    pub fn map_err<F, E2>(self, f: F) -> RetryError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        RetryError {
            kind: self.kind,
            last_error: f(self.last_error),
            attempts: self.attempts,
            elapsed: self.elapsed,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} after {} attempts ({:?}): {}",
            self.kind, self.attempts, self.elapsed, self.last_error
        )
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}
