//! Bounded exponential-backoff retry for hosted model calls.
//!
//! [`retry`] takes the policy, a [`Clock`] and a retryable-error predicate
//! explicitly so it can be driven by a fake clock in tests.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Wait before the second attempt.
    pub initial_delay: Duration,
    /// Factor by which the wait grows after each failure.
    pub multiplier: f64,
    /// Upper bound on a single wait.
    pub max_delay: Duration,
    /// Upper bound on the sum of all waits.
    pub deadline: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(120),
            multiplier: 2.0,
            max_delay: Duration::from_secs(300),
            deadline: Duration::from_secs(600),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// The wait following `current`, clamped to `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let next_ms = (current.as_millis() as f64 * self.multiplier) as u64;
        Duration::from_millis(next_ms).min(self.max_delay)
    }
}

/// Source of delays. Production uses [`TokioClock`].
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, runs out
/// of attempts, or the next wait would push total waiting past the
/// policy deadline. The last error is returned.
pub async fn retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    clock: &dyn Clock,
    is_retryable: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut attempt = 1u32;
    let mut delay = policy.initial_delay.min(policy.max_delay);
    let mut waited = Duration::ZERO;

    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retryable(&err) {
            return Err(err);
        }
        if attempt >= policy.max_attempts {
            tracing::warn!(attempt, error = %err, "Retries exhausted");
            return Err(err);
        }
        if waited + delay > policy.deadline {
            tracing::warn!(
                attempt,
                waited_secs = waited.as_secs(),
                error = %err,
                "Retry deadline reached",
            );
            return Err(err);
        }

        tracing::warn!(
            attempt,
            delay_secs = delay.as_secs_f64(),
            error = %err,
            "Transient failure, retrying",
        );
        clock.sleep(delay).await;
        waited += delay;
        delay = policy.next_delay(delay);
        attempt += 1;
    }
}
