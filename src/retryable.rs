//! The retryable computation abstraction.

use std::future::Future;

/// An operation the executor can invoke any number of times.
///
/// Each call to [`attempt`](Retryable::attempt) starts a fresh try from
/// scratch. Any `FnMut() -> Fut` where `Fut` resolves to a `Result`
/// implements this trait, so closures returning `async` blocks work directly.
/// Operations that only signal success or failure use `Output = ()`.
///
/// # Examples
///
/// ```rust
/// use retrier::Retryable;
///
/// # tokio_test::block_on(async {
/// let mut calls = 0;
/// let mut op = || {
///     calls += 1;
///     let n = calls;
///     async move { if n < 2 { Err("busy") } else { Ok(n) } }
/// };
///
/// assert_eq!(op.attempt().await, Err("busy"));
/// assert_eq!(op.attempt().await, Ok(2));
/// # });
/// ```
pub trait Retryable {
    /// The value produced on success.
    type Output;
    /// The error produced by a failed attempt.
    type Error;
    /// The future returned by one attempt.
    type Future: Future<Output = Result<Self::Output, Self::Error>>;

    /// Start one attempt.
    fn attempt(&mut self) -> Self::Future;
}

impl<F, Fut, T, E> Retryable for F
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    type Output = T;
    type Error = E;
    type Future = Fut;

    fn attempt(&mut self) -> Self::Future {
        self()
    }
}
