//! Retry observation and logging
//!
//! The `RetryObserver` trait receives callbacks while an operation is retried.
//! `TracingObserver` logs them through `tracing`; `StatsObserver` counts them.

use std::fmt::Display;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Observer trait for retry attempt events
pub trait RetryObserver: Send + Sync {
    /// Called when an attempt is about to start (1-indexed)
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32);

    /// Called when an attempt fails and will be retried after `delay`
    fn on_attempt_failed(&self, attempt: u32, max_attempts: u32, error: &dyn Display, delay: Duration);

    /// Called when the operation succeeds
    fn on_success(&self, attempt: u32, total_duration: Duration);

    /// Called when all retry attempts are exhausted
    fn on_exhausted(&self, attempts: u32, final_error: &dyn Display);

    /// Called when the cancellation token stops the retry loop
    fn on_cancelled(&self, attempts: u32) {
        let _ = attempts;
    }
}

/// A no-op observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, _attempt: u32, _max_attempts: u32, _error: &dyn Display, _delay: Duration) {}

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Display) {}
}

/// An observer that logs retry events using the `tracing` crate
///
/// # Log Levels
///
/// - `on_attempt_start`: DEBUG
/// - `on_attempt_failed`: WARN
/// - `on_success`: INFO (if > 1 attempt) or DEBUG (first attempt)
/// - `on_exhausted`: ERROR
/// - `on_cancelled`: WARN
#[derive(Debug, Clone)]
pub struct TracingObserver {
    /// Name of the operation being retried
    operation: String,
    /// Path of the item the operation acts on, if any
    path: Option<String>,
}

impl TracingObserver {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            path: None,
        }
    }

    /// Attach the item path to every log line
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("-")
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("retry")
    }
}

impl RetryObserver for TracingObserver {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        tracing::debug!(
            operation = %self.operation,
            path = %self.path(),
            attempt,
            max_attempts,
            "Starting attempt"
        );
    }

    fn on_attempt_failed(&self, attempt: u32, max_attempts: u32, error: &dyn Display, delay: Duration) {
        tracing::warn!(
            operation = %self.operation,
            path = %self.path(),
            attempt,
            max_attempts,
            error = %error,
            delay_ms = delay.as_millis() as u64,
            "Attempt failed, retrying after backoff"
        );
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        if attempt > 1 {
            tracing::info!(
                operation = %self.operation,
                path = %self.path(),
                attempt,
                total_duration_ms = total_duration.as_millis() as u64,
                "Succeeded after retrying"
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                path = %self.path(),
                duration_ms = total_duration.as_millis() as u64,
                "Succeeded on first attempt"
            );
        }
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Display) {
        tracing::error!(
            operation = %self.operation,
            path = %self.path(),
            attempts,
            error = %final_error,
            "Giving up, every attempt failed"
        );
    }

    fn on_cancelled(&self, attempts: u32) {
        tracing::warn!(
            operation = %self.operation,
            path = %self.path(),
            attempts,
            "Cancelled before completion"
        );
    }
}

/// Counts of retry events seen by a [`StatsObserver`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryStats {
    pub attempts: u32,
    pub failures: u32,
    pub successes: u32,
    pub exhausted: u32,
    pub cancelled: u32,
}

/// Observer that records event counts, for tests
#[derive(Debug, Default)]
pub struct StatsObserver {
    stats: Mutex<RetryStats>,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RetryStats {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, RetryStats> {
        // Counters stay meaningful even if a holder panicked
        self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RetryObserver for StatsObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {
        self.lock().attempts += 1;
    }

    fn on_attempt_failed(&self, _attempt: u32, _max_attempts: u32, _error: &dyn Display, _delay: Duration) {
        self.lock().failures += 1;
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {
        self.lock().successes += 1;
    }

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Display) {
        self.lock().exhausted += 1;
    }

    fn on_cancelled(&self, _attempts: u32) {
        self.lock().cancelled += 1;
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for std::sync::Arc<T> {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        (**self).on_attempt_start(attempt, max_attempts)
    }

    fn on_attempt_failed(&self, attempt: u32, max_attempts: u32, error: &dyn Display, delay: Duration) {
        (**self).on_attempt_failed(attempt, max_attempts, error, delay)
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration)
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Display) {
        (**self).on_exhausted(attempts, final_error)
    }

    fn on_cancelled(&self, attempts: u32) {
        (**self).on_cancelled(attempts)
    }
}
