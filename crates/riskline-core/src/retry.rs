//! Retry budget with linear backoff.
//!
//! Attempt numbers are 1-indexed. After a failed attempt `n` that is not the
//! last one, the caller waits `backoff_base * n` before attempt `n + 1`, so the
//! total time spent sleeping is bounded by
//! `backoff_base * attempts * (attempts + 1) / 2`.

use std::time::Duration;

use crate::RiskError;

/// Fixed attempt budget plus the base delay for linear backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_base: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Create a policy allowing `attempts` calls in total.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] when `attempts` is zero.
    pub fn new(attempts: u32, backoff_base: Duration) -> Result<Self, RiskError> {
        if attempts == 0 {
            return Err(RiskError::invalid_input("retry count must be at least 1"));
        }
        Ok(Self {
            attempts,
            backoff_base,
        })
    }

    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    pub const fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub const fn is_final(&self, attempt: u32) -> bool {
        attempt >= self.attempts
    }

    /// Delay to wait after failed `attempt` before the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_base
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }

    /// Sum of every backoff delay a fully failing call sleeps through.
    pub fn total_backoff(&self) -> Duration {
        (1..self.attempts)
            .map(|attempt| self.delay_after(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}
