//! Bounded-concurrency bulk upload with per-object retry

use crate::error::StorageError;
use crate::s3::backend::ObjectStore;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use vaultlift_core::retry::{RetryError, RetryExecutor, RetryPolicy, TracingObserver};
use vaultlift_core::{Secret, UploadOutcome};

/// Content type declared on every exported object
pub const CONTENT_TYPE: &str = "application/json";

const MAX_CONCURRENCY: usize = 10;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Upload stage tuning
#[derive(Debug, Clone)]
pub struct UploaderSettings {
    /// Maximum uploads in flight at once
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

impl Default for UploaderSettings {
    /// 10 concurrent uploads, 3 attempts each, waiting 2s then 4s between them
    fn default() -> Self {
        Self {
            concurrency: MAX_CONCURRENCY,
            retry: RetryPolicy::linear(MAX_ATTEMPTS, RETRY_DELAY),
        }
    }
}

pub struct BulkUploader {
    store: Arc<dyn ObjectStore>,
    settings: UploaderSettings,
}

impl BulkUploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_settings(store, UploaderSettings::default())
    }

    pub fn with_settings(store: Arc<dyn ObjectStore>, settings: UploaderSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &UploaderSettings {
        &self.settings
    }

    /// Upload every secret, returning one outcome per input in input order
    ///
    /// At most `concurrency` uploads (including their backoff waits) hold a
    /// slot at once; the rest wait for one to free up. A failed item never
    /// stops the others.
    pub async fn upload_all(&self, secrets: &[Secret], cancel: &CancellationToken) -> Vec<UploadOutcome> {
        info!(total_secrets = secrets.len(), "Starting concurrent upload of secrets");

        let slots = Semaphore::new(self.settings.concurrency.max(1));
        let uploads = secrets.iter().map(|secret| {
            let slots = &slots;
            async move {
                let _permit = match slots.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return UploadOutcome::failure(secret.path(), secret.object_key(), e);
                    }
                };
                self.upload_with_retry(secret, cancel).await
            }
        });

        // join_all yields results positionally, regardless of completion order
        let outcomes = join_all(uploads).await;

        let failures = outcomes.iter().filter(|o| !o.succeeded).count();
        info!(
            total = outcomes.len(),
            successes = outcomes.len() - failures,
            failures,
            "Completed uploading secrets"
        );

        outcomes
    }

    /// Upload one secret, retrying failed writes per the retry policy
    pub async fn upload_with_retry(&self, secret: &Secret, cancel: &CancellationToken) -> UploadOutcome {
        let key = secret.object_key();

        let body = match secret.to_json_pretty() {
            Ok(body) => body,
            Err(e) => {
                let e = StorageError::from(e);
                error!(secret_path = %secret.path(), s3_key = %key, error = %e, "Failed to serialize secret");
                return UploadOutcome::failure(secret.path(), key, e);
            }
        };

        let executor = RetryExecutor::new(self.settings.retry.clone())
            .with_observer(TracingObserver::new("upload").with_path(secret.path()));

        let result = executor
            .execute(
                || self.store.put_object(&key, body.clone(), CONTENT_TYPE),
                cancel,
            )
            .await;

        match result {
            Ok(()) => {
                info!(secret_path = %secret.path(), s3_key = %key, "Successfully uploaded secret");
                UploadOutcome::success(secret.path(), key)
            }
            Err(err) => {
                let attempts = err.attempts();
                let message = match err {
                    RetryError::Exhausted { source, .. } => source.to_string(),
                    cancelled @ RetryError::Cancelled { .. } => cancelled.to_string(),
                };
                error!(
                    secret_path = %secret.path(),
                    s3_key = %key,
                    attempts,
                    error = %message,
                    "Failed to upload secret after all retries"
                );
                UploadOutcome::failure(secret.path(), key, message)
            }
        }
    }
}
