//! Retry outcome errors

use std::time::Duration;
use thiserror::Error;

/// Why a retried operation did not produce a value
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed; `source` is the error from the last one
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        source: E,
        total_duration: Duration,
    },

    /// The cancellation token fired first
    #[error("operation cancelled after {attempts} attempts")]
    Cancelled {
        /// Attempts started before cancellation
        attempts: u32,
        last_error: Option<E>,
    },
}

impl<E> RetryError<E> {
    pub fn exhausted(attempts: u32, source: E, total_duration: Duration) -> Self {
        Self::Exhausted {
            attempts,
            source,
            total_duration,
        }
    }

    pub fn cancelled(attempts: u32, last_error: Option<E>) -> Self {
        Self::Cancelled {
            attempts,
            last_error,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } | Self::Cancelled { attempts, .. } => *attempts,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// The last operation error, if any attempt completed
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Exhausted { source, .. } => Some(source),
            Self::Cancelled { last_error, .. } => last_error,
        }
    }
}
