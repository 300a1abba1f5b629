//! Secret value retrieval
//!
//! Fetches one identifier at a time. Failures are returned to the caller,
//! which decides whether to drop the item.

use crate::error::SourceError;
use crate::sources::SecretStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vaultlift_core::Secret;

/// Source of retrieval timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct SecretFetcher {
    store: Arc<dyn SecretStore>,
    clock: Clock,
}

impl SecretFetcher {
    /// Create a fetcher stamping secrets with the current UTC time
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    pub fn with_clock(store: Arc<dyn SecretStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    /// Fetch the current value of `identifier`
    ///
    /// Returns `SourceError::NotFound` when the store answers without the key;
    /// every other error is transport-level.
    pub async fn fetch(
        &self,
        identifier: &str,
        cancel: &CancellationToken,
    ) -> Result<Secret, SourceError> {
        debug!(store = self.store.name(), secret_path = %identifier, "Retrieving secret value");

        let value = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SourceError::Cancelled),
            value = self.store.get_value(identifier) => value?,
        };

        let value = value.ok_or_else(|| SourceError::not_found(identifier))?;
        Ok(Secret::new(identifier, value, (self.clock)())?)
    }
}
