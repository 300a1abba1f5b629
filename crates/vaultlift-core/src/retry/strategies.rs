//! Retry policy and backoff delay calculation

use std::time::Duration;

/// Retry policy for an operation
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    pub strategy: RetryStrategy,
    /// Backoff multiplier for exponential strategies
    pub backoff_multiplier: f64,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Linear backoff: the delay after attempt `k` is `initial_delay * k`
    pub fn linear(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            strategy: RetryStrategy::LinearBackoff,
            initial_delay_ms: initial_delay.as_millis() as u64,
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            strategy: RetryStrategy::default(),
            backoff_multiplier: 2.0,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
        }
    }
}

/// Retry strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryStrategy {
    /// No delay between attempts
    None,

    /// Fixed delay between retries
    FixedDelay,

    /// Exponential backoff (default)
    #[default]
    ExponentialBackoff,

    /// Linear backoff
    LinearBackoff,
}

/// Calculate the delay to wait after a failed attempt
///
/// `attempt` is the 1-indexed number of the attempt that just failed.
///
/// ```rust
/// use std::time::Duration;
/// use vaultlift_core::retry::{calculate_delay, RetryPolicy};
///
/// let policy = RetryPolicy::linear(3, Duration::from_secs(2));
/// assert_eq!(calculate_delay(&policy, 1), Duration::from_secs(2));
/// assert_eq!(calculate_delay(&policy, 2), Duration::from_secs(4));
/// ```
pub fn calculate_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let attempt_index = attempt.saturating_sub(1);

    let base_delay_ms = match policy.strategy {
        RetryStrategy::None => 0,

        RetryStrategy::FixedDelay => policy.initial_delay_ms,

        RetryStrategy::ExponentialBackoff => {
            let multiplier = policy.backoff_multiplier.powf(attempt_index as f64);
            (policy.initial_delay_ms as f64 * multiplier) as u64
        }

        RetryStrategy::LinearBackoff => policy.initial_delay_ms * (attempt_index as u64 + 1),
    };

    Duration::from_millis(base_delay_ms.min(policy.max_delay_ms))
}
