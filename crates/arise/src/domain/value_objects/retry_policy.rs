//! RetryPolicy - Backoff schedule for rate-limited generator calls

use std::time::Duration;

use crate::domain::errors::GenerationError;

/// Retry behavior for calls to the content generator.
///
/// Only rate-limited failures are retried. `max_attempts` counts every call,
/// the first one included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of calls, first attempt included
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for a single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(2000),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            ..Self::default()
        }
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Whether `error` should be retried after `attempts_made` calls
    pub fn should_retry(&self, error: &GenerationError, attempts_made: u32) -> bool {
        error.is_rate_limited() && attempts_made < self.max_attempts
    }

    /// Delay before retry number `retry` (1-based), doubling each time.
    ///
    /// A provider supplied `retry_after` wins when it is longer.
    pub fn backoff(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        let delay = self
            .initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff);
        match retry_after {
            Some(hint) if hint > delay => hint.min(self.max_backoff),
            _ => delay,
        }
    }
}
