//! Retry policy behaviour, driven by a fake clock.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use greenthreads_gemini::retry::{retry, Clock, RetryPolicy};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Records requested sleeps and returns immediately.
#[derive(Default)]
struct FakeClock {
    sleeps: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

impl FakeClock {
    fn sleeps(&self) -> Vec<u64> {
        self.sleeps.lock().unwrap().iter().map(|d| d.as_secs()).collect()
    }
}

#[derive(Debug, PartialEq)]
enum TestError {
    Transient,
    Fatal,
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

fn is_transient(e: &TestError) -> bool {
    *e == TestError::Transient
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_needs_no_wait() {
    let clock = FakeClock::default();
    let result: Result<&str, TestError> =
        retry(&RetryPolicy::default(), &clock, is_transient, || async { Ok("done") }).await;
    assert_eq!(result, Ok("done"));
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn default_policy_stops_at_deadline() {
    let clock = FakeClock::default();
    let calls = AtomicU32::new(0);

    let result: Result<(), TestError> = retry(&RetryPolicy::default(), &clock, is_transient, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(TestError::Transient) }
    })
    .await;

    assert_eq!(result, Err(TestError::Transient));
    // 120 + 240 = 360; the next 300s wait would exceed the 600s budget.
    assert_eq!(clock.sleeps(), vec![120, 240]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn attempts_cap_applies_before_deadline() {
    let clock = FakeClock::default();
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy {
        max_attempts: 4,
        initial_delay: Duration::from_secs(1),
        multiplier: 2.0,
        max_delay: Duration::from_secs(30),
        deadline: Duration::from_secs(600),
    };

    let result: Result<(), TestError> = retry(&policy, &clock, is_transient, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(TestError::Transient) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(clock.sleeps(), vec![1, 2, 4]);
}

#[tokio::test]
async fn recovers_after_transient_failures() {
    let clock = FakeClock::default();
    let calls = AtomicU32::new(0);

    let result = retry(&RetryPolicy::default(), &clock, is_transient, || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 2 {
                Err(TestError::Transient)
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(2));
    assert_eq!(clock.sleeps(), vec![120, 240]);
}

#[tokio::test]
async fn non_transient_error_fails_immediately() {
    let clock = FakeClock::default();
    let calls = AtomicU32::new(0);

    let result: Result<(), TestError> = retry(&RetryPolicy::default(), &clock, is_transient, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(TestError::Fatal) }
    })
    .await;

    assert_eq!(result, Err(TestError::Fatal));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn single_attempt_policy_never_waits() {
    let clock = FakeClock::default();
    let result: Result<(), TestError> =
        retry(&RetryPolicy::none(), &clock, is_transient, || async { Err(TestError::Transient) }).await;
    assert!(result.is_err());
    assert!(clock.sleeps().is_empty());
}
