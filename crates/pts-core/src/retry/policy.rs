use std::fmt;
use std::time::Duration;

/// Retry budget used when nothing is configured.
pub const DEFAULT_RETRIES: u32 = 5;

/// Computes how long to wait before the next attempt.
///
/// `attempt` is 0-based: it is the number of retries already made before
/// this failure.
pub trait Backoff: fmt::Debug {
    fn delay(&self, attempt: u32) -> Duration;
}

/// Delay grows by one step per retry: `(1 + attempt) * step`.
///
/// With the default one second step this yields 1s, 2s, 3s, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoff {
    pub step: Duration,
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self {
            step: Duration::from_secs(1),
        }
    }
}

impl Backoff for LinearBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt.saturating_add(1))
    }
}

/// Always zero; for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBackoff;

impl Backoff for NoBackoff {
    fn delay(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy<B = LinearBackoff> {
    /// Retries after the initial call. 0 means a single attempt.
    pub retries: u32,
    pub backoff: B,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            backoff: LinearBackoff::default(),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            ..Self::default()
        }
    }
}

impl<B: Backoff> RetryPolicy<B> {
    pub fn with_backoff<B2: Backoff>(self, backoff: B2) -> RetryPolicy<B2> {
        RetryPolicy {
            retries: self.retries,
            backoff,
        }
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }

    /// Upper bound on total sleep across one exhausted call.
    pub fn worst_case_wait(&self) -> Duration {
        (0..self.retries)
            .map(|a| self.delay(a))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}
