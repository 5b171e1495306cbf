//! Retry policy for geocoding lookups.

use std::time::Duration;

use backon::ConstantBuilder;

/// Fixed-interval retry: a bounded number of attempts with a constant
/// pause between them. No exponential growth, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: usize,
    delay: Duration,
}

impl RetryPolicy {
    /// Three attempts, two seconds apart.
    pub const DEFAULT: Self = Self {
        attempts: 3,
        delay: Duration::from_secs(2),
    };

    /// Creates a policy making `attempts` tries in total. Zero is treated
    /// as one.
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The `backon` builder for this policy. `backon` counts retries, not
    /// attempts, so the first try is not included in `max_times`.
    pub fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use backon::BackoffBuilder;

    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts(), 3);
        assert_eq!(policy.delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).attempts(), 1);
    }

    #[test]
    fn test_backoff_yields_constant_delays_between_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_millis(250));
        let delays: Vec<Duration> = policy.backoff().build().collect();
        assert_eq!(delays, vec![Duration::from_millis(250); 2]);
    }
}
