//! Retry execution engine

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::strategies::{calculate_delay, RetryPolicy};

/// A retry executor with configurable policy and observer
pub struct RetryExecutor<O = NoOpObserver> {
    policy: RetryPolicy,
    observer: O,
}

impl RetryExecutor<NoOpObserver> {
    /// Create an executor that reports nothing
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            observer: NoOpObserver,
        }
    }
}

impl<O> RetryExecutor<O> {
    /// Set the observer
    ///
    /// The observer receives callbacks during retry execution.
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutor<O2> {
        RetryExecutor {
            policy: self.policy,
            observer,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<O: RetryObserver> RetryExecutor<O> {
    /// Execute an operation with retry logic
    ///
    /// The first success short-circuits remaining attempts. Each attempt and
    /// each backoff sleep is raced against `cancel`; whichever completes first
    /// wins.
    pub async fn execute<F, Fut, T, E>(
        &self,
        mut op: F,
        cancel: &CancellationToken,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let start = Instant::now();
        let max_attempts = self.policy.max_attempts;
        let mut last_error: Option<E> = None;

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                self.observer.on_cancelled(attempt - 1);
                return Err(RetryError::cancelled(attempt - 1, last_error));
            }

            self.observer.on_attempt_start(attempt, max_attempts);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.observer.on_cancelled(attempt);
                    return Err(RetryError::cancelled(attempt, last_error));
                }
                result = op() => result,
            };

            match result {
                Ok(value) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(value);
                }
                Err(err) => {
                    if attempt >= max_attempts {
                        self.observer.on_exhausted(attempt, &err);
                        return Err(RetryError::exhausted(attempt, err, start.elapsed()));
                    }

                    let delay = calculate_delay(&self.policy, attempt);
                    self.observer
                        .on_attempt_failed(attempt, max_attempts, &err, delay);
                    last_error = Some(err);

                    if !delay.is_zero() {
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => {
                                self.observer.on_cancelled(attempt);
                                return Err(RetryError::cancelled(attempt, last_error));
                            }
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                }
            }
        }

        // Only reachable with max_attempts == 0
        Err(RetryError::cancelled(0, last_error))
    }
}
