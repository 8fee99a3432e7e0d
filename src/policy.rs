//! Retry policy types and presets.

use std::time::Duration;

/// Number of attempts used when [`Policy::max_attempts`] is left at `0`.
pub const DEFAULT_ATTEMPTS: u32 = 100;

/// Overall run timeout used by the preset constructors.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A retry policy describing how a failed operation is retried.
///
/// Policies are plain data. Every field is public so callers can start from a
/// preset and override what they need; the executor honors whatever values it
/// is given, including degenerate ones such as a zero `timeout`.
///
/// The executor takes the policy by value, so changing a policy after a run
/// has started never affects that run.
///
/// # Examples
///
/// ```rust
/// use retrier::Policy;
/// use std::time::Duration;
///
/// let mut policy = Policy::constant(Duration::from_millis(250));
/// policy.max_attempts = 5;
/// policy.timeout = Duration::from_secs(2);
///
/// assert_eq!(policy.multiplier, 1);
/// assert!(!policy.jitter);
/// assert_eq!(policy.effective_attempts(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Policy {
    /// Unit delay. The delay after the failure of attempt `i` is
    /// `base * multiplier^i`.
    pub base: Duration,
    /// Growth factor per attempt: `1` is constant backoff, `2` or more is
    /// exponential.
    pub multiplier: u32,
    /// Bound on total elapsed time, measured from the start of the run.
    ///
    /// A zero timeout still allows the first attempt.
    pub timeout: Duration,
    /// Cap on the number of invocations. `0` means [`DEFAULT_ATTEMPTS`].
    pub max_attempts: u32,
    /// Use full jitter: each delay is drawn uniformly from `[1ms, delay]`.
    pub jitter: bool,
}

impl Policy {
    /// Exponential backoff starting at one second, doubling each attempt,
    /// with full jitter and a one minute timeout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrier::{Policy, DEFAULT_TIMEOUT};
    /// use std::time::Duration;
    ///
    /// let policy = Policy::exponential();
    /// assert_eq!(policy.base, Duration::from_secs(1));
    /// assert_eq!(policy.multiplier, 2);
    /// assert_eq!(policy.timeout, DEFAULT_TIMEOUT);
    /// assert!(policy.jitter);
    /// ```
    pub const fn exponential() -> Self {
        Self {
            base: Duration::from_secs(1),
            multiplier: 2,
            timeout: DEFAULT_TIMEOUT,
            max_attempts: 0,
            jitter: true,
        }
    }

    /// Constant backoff with a caller-supplied delay and a one minute timeout.
    /// Jitter is off.
    pub const fn constant(base: Duration) -> Self {
        Self {
            base,
            multiplier: 1,
            timeout: DEFAULT_TIMEOUT,
            max_attempts: 0,
            jitter: false,
        }
    }

    /// Set the unit delay.
    pub const fn with_base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Set the growth factor.
    pub const fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the overall run timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the attempt cap. `0` restores the default of [`DEFAULT_ATTEMPTS`].
    ///
    /// ```rust
    /// use retrier::Policy;
    ///
    /// let policy = Policy::exponential().with_max_attempts(3);
    /// assert_eq!(policy.effective_attempts(), 3);
    ///
    /// let policy = policy.with_max_attempts(0);
    /// assert_eq!(policy.effective_attempts(), retrier::DEFAULT_ATTEMPTS);
    /// ```
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Turn full jitter on or off.
    pub const fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// The attempt cap the executor actually uses.
    pub const fn effective_attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            DEFAULT_ATTEMPTS
        } else {
            self.max_attempts
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::exponential()
    }
}

/// Exponential backoff preset. See [`Policy::exponential`].
pub const fn exponential_backoff() -> Policy {
    Policy::exponential()
}

/// Constant backoff preset. See [`Policy::constant`].
pub const fn constant_backoff(base: Duration) -> Policy {
    Policy::constant(base)
}

/// The default policy, which is [`exponential_backoff`].
pub const fn default_policy() -> Policy {
    Policy::exponential()
}
