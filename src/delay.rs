//! Delay calculation for the pause that follows a failed attempt.
//!
//! The delay after the failure of attempt `i` (0-based) is
//! `base * multiplier^i` whole milliseconds, so the first retry always waits
//! `base`. With full jitter the delay is drawn uniformly from `[1, raw]`
//! milliseconds and is never zero.

use std::time::Duration;

use rand::Rng;

use crate::policy::Policy;

/// The un-jittered delay in milliseconds after the failure of `attempt`.
///
/// Arithmetic saturates at `u64::MAX` instead of wrapping. Sub-millisecond
/// precision in `base` is discarded.
///
/// # Examples
///
/// ```rust
/// use retrier::{raw_delay, Policy};
/// use std::time::Duration;
///
/// let policy = Policy::exponential().with_base(Duration::from_millis(100));
/// assert_eq!(raw_delay(&policy, 0), 100);
/// assert_eq!(raw_delay(&policy, 1), 200);
/// assert_eq!(raw_delay(&policy, 3), 800);
/// ```
pub fn raw_delay(policy: &Policy, attempt: u32) -> u64 {
    let base_ms = u64::try_from(policy.base.as_millis()).unwrap_or(u64::MAX);
    let factor = u64::from(policy.multiplier).saturating_pow(attempt);
    base_ms.saturating_mul(factor)
}

/// Compute the delay after the failure of `attempt` using the thread-local
/// random generator for jitter.
///
/// `rand::rng()` is per thread, so concurrent runs never share generator
/// state.
///
/// ```rust
/// use retrier::{delay, Policy};
/// use std::time::Duration;
///
/// let policy = Policy::constant(Duration::from_millis(40));
/// assert_eq!(delay(&policy, 5), Duration::from_millis(40));
/// ```
pub fn delay(policy: &Policy, attempt: u32) -> Duration {
    delay_with_rng(policy, attempt, &mut rand::rng())
}

/// Compute the delay after the failure of `attempt` with a caller-supplied
/// random generator.
///
/// When jitter is on and the raw delay is `0ms` (a sub-millisecond `base` or a
/// zero `multiplier`), the upper bound is clamped to `1ms` so the generator is
/// never asked for an empty range.
pub fn delay_with_rng<R: Rng>(policy: &Policy, attempt: u32, rng: &mut R) -> Duration {
    let raw = raw_delay(policy, attempt);
    let millis = if policy.jitter {
        rng.random_range(1..=raw.max(1))
    } else {
        raw
    };
    Duration::from_millis(millis)
}
