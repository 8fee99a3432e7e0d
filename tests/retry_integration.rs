//! Integration tests for the retry executor on the real clock and under
//! concurrent use.

use retrier::prelude::*;
use std::error::Error as _;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
enum FetchError {
    Unavailable,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "service unavailable")
    }
}

impl std::error::Error for FetchError {}

#[tokio::test]
async fn test_constant_backoff_wall_clock() {
    let policy = constant_backoff(Duration::from_millis(2)).with_max_attempts(5);
    let start = Instant::now();

    let err = execute(|| async { Err::<(), _>(FetchError::Unavailable) }, policy)
        .await
        .unwrap_err();

    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(8),
        "Expected at least 8ms, got {:?}",
        elapsed
    );
    assert!(
        elapsed < Duration::from_millis(500),
        "Expected well under 500ms, got {:?}",
        elapsed
    );
    assert!(err.is_max_attempts());
    assert_eq!(err.attempts, 5);
}

#[tokio::test]
async fn test_timeout_wall_clock() {
    let attempts = AtomicU32::new(0);
    let policy = constant_backoff(Duration::from_secs(1)).with_timeout(Duration::from_millis(10));
    let start = Instant::now();

    let err = execute(
        || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(FetchError::Unavailable) }
        },
        policy,
    )
    .await
    .unwrap_err();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(10), "got {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(500), "got {:?}", elapsed);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(err.is_timeout());
    assert_eq!(err.kind(), ErrorKind::TimeoutExceeded);
    assert_eq!(err.last_error(), &FetchError::Unavailable);
}

#[tokio::test]
async fn test_error_is_both_kind_and_cause() {
    let err = execute(
        || async { Err::<(), _>(FetchError::Unavailable) },
        constant_backoff(Duration::from_millis(1)).with_max_attempts(2),
    )
    .await
    .unwrap_err();

    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    assert!(boxed.to_string().contains("max attempts reached"));
    assert!(boxed.to_string().contains("service unavailable"));

    let retry = boxed
        .downcast_ref::<RetryError<FetchError>>()
        .expect("retry error");
    assert!(retry.is_max_attempts());
    assert!(boxed
        .source()
        .and_then(|e| e.downcast_ref::<FetchError>())
        .is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_runs_are_independent() {
    let retrier = Retrier::new(
        exponential_backoff()
            .with_base(Duration::from_millis(2))
            .with_max_attempts(5),
    );

    let runs = (0..32u32).map(|id| {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let handle = tokio::spawn(async move {
            retrier
                .run(move || {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < id % 3 {
                            Err(FetchError::Unavailable)
                        } else {
                            Ok(id)
                        }
                    }
                })
                .await
        });
        async move { (id, attempts, handle.await) }
    });

    for (id, attempts, outcome) in futures::future::join_all(runs).await {
        assert_eq!(outcome.unwrap(), Ok(id));
        assert_eq!(attempts.load(Ordering::SeqCst), id % 3 + 1);
    }
}

#[tokio::test]
async fn test_void_operation_with_default_policy() {
    let attempts = AtomicU32::new(0);

    let result = execute_void(
        || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(FetchError::Unavailable)
                } else {
                    Ok(())
                }
            }
        },
        default_policy().with_base(Duration::from_millis(1)),
    )
    .await;

    assert_eq!(result, Ok(()));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
