//! Retry policy: attempt cap plus an injected backoff curve
//!
//! The backoff function maps the attempt count (1 = first failure) to the
//! delay before the next try. It must be monotonically non-decreasing in
//! the attempt count; together with the attempt cap that guarantees every
//! item either delivers or dead-letters.

use chrono::Duration;

/// Delivery retry policy.
pub struct RetryPolicy {
    /// Cap applied when an item carries no `MaxAttempts` of its own.
    pub default_max_attempts: u32,
    backoff: Box<dyn Fn(u32) -> Duration + Send + Sync>,
}

impl RetryPolicy {
    /// Policy with a caller-supplied backoff curve.
    pub fn new(
        default_max_attempts: u32,
        backoff: impl Fn(u32) -> Duration + Send + Sync + 'static,
    ) -> Self {
        Self {
            default_max_attempts,
            backoff: Box::new(backoff),
        }
    }

    /// Constant delay between attempts.
    pub fn fixed(default_max_attempts: u32, delay: Duration) -> Self {
        Self::new(default_max_attempts, move |_| delay)
    }

    /// Doubling delay starting at `initial`, capped at `cap`.
    pub fn doubling(default_max_attempts: u32, initial: Duration, cap: Duration) -> Self {
        Self::new(default_max_attempts, move |attempts| {
            let exponent = attempts.saturating_sub(1).min(30);
            let delay = initial * 2_i32.pow(exponent);
            if delay > cap {
                cap
            } else {
                delay
            }
        })
    }

    /// Delay before the next try, given the attempts made so far.
    pub fn backoff(&self, attempts: u32) -> Duration {
        (self.backoff)(attempts)
    }

    /// Attempt cap for an item: its own `MaxAttempts` if set, else the
    /// policy default.
    pub fn effective_max(&self, item_max: Option<u32>) -> u32 {
        item_max.unwrap_or(self.default_max_attempts)
    }
}

impl Default for RetryPolicy {
    /// 5 attempts, doubling backoff from 10 minutes capped at 24 hours.
    fn default() -> Self {
        Self::doubling(5, Duration::minutes(10), Duration::hours(24))
    }
}
