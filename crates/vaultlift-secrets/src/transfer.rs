//! End-to-end export: discover, fetch, upload, report
//!
//! Stages run strictly one after another. Per-item failures are logged and
//! counted; only whole-run conditions turn into a `TransferError`. Uploads are
//! not rolled back on partial failure; rerunning overwrites every object.

use crate::discovery::{DiscoveryWarning, TreeDiscoverer};
use crate::error::TransferError;
use crate::fetcher::SecretFetcher;
use crate::s3::{BulkUploader, ObjectStore};
use crate::sources::SecretStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use vaultlift_core::{Secret, UploadOutcome};

/// Totals from one export run
#[derive(Debug, Default)]
pub struct TransferReport {
    pub discovered: usize,
    pub fetched: usize,
    pub fetch_failures: usize,
    pub discovery_warnings: Vec<DiscoveryWarning>,
    /// One per fetched secret, in fetch order
    pub outcomes: Vec<UploadOutcome>,
}

impl TransferReport {
    pub fn uploaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn upload_failures(&self) -> usize {
        self.outcomes.len() - self.uploaded()
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }
}

pub struct TransferCoordinator {
    discoverer: TreeDiscoverer,
    fetcher: SecretFetcher,
    uploader: BulkUploader,
    base_path: String,
}

impl TransferCoordinator {
    pub fn new(
        discoverer: TreeDiscoverer,
        fetcher: SecretFetcher,
        uploader: BulkUploader,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            discoverer,
            fetcher,
            uploader,
            base_path: base_path.into(),
        }
    }

    /// Wire the default stages around a secrets store and an object store
    pub fn from_stores(
        source: Arc<dyn SecretStore>,
        objects: Arc<dyn ObjectStore>,
        base_path: impl Into<String>,
    ) -> Self {
        Self::new(
            TreeDiscoverer::new(source.clone()),
            SecretFetcher::new(source),
            BulkUploader::new(objects),
            base_path,
        )
    }

    /// Run the full export
    ///
    /// An empty namespace is a successful run with nothing uploaded.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<TransferReport, TransferError> {
        let discovery = self
            .discoverer
            .discover(&self.base_path, cancel)
            .await
            .map_err(|_| TransferError::Cancelled { stage: "discovery" })?;

        let mut report = TransferReport {
            discovered: discovery.items.len(),
            discovery_warnings: discovery.warnings,
            ..TransferReport::default()
        };

        if discovery.items.is_empty() {
            warn!(base_path = %self.base_path, "No secrets found, nothing to upload");
            return Ok(report);
        }
        info!(count = report.discovered, "Found secrets");

        let mut secrets: Vec<Secret> = Vec::with_capacity(discovery.items.len());
        for item in &discovery.items {
            if cancel.is_cancelled() {
                return Err(TransferError::Cancelled { stage: "retrieval" });
            }

            match self.fetcher.fetch(&item.identifier, cancel).await {
                Ok(secret) => secrets.push(secret),
                Err(e) if e.is_cancelled() => {
                    return Err(TransferError::Cancelled { stage: "retrieval" });
                }
                Err(e) => {
                    error!(
                        secret_path = %item.identifier,
                        item_type = %item.declared_type,
                        error = %e,
                        "Failed to retrieve secret value"
                    );
                    report.fetch_failures += 1;
                }
            }
        }
        if cancel.is_cancelled() {
            return Err(TransferError::Cancelled { stage: "retrieval" });
        }
        report.fetched = secrets.len();

        info!(
            retrieved = report.fetched,
            failed = report.fetch_failures,
            "Finished retrieving secret values"
        );

        if secrets.is_empty() {
            return Err(TransferError::NothingFetched {
                discovered: report.discovered,
                failed: report.fetch_failures,
            });
        }

        report.outcomes = self.uploader.upload_all(&secrets, cancel).await;

        let failed = report.upload_failures();
        let total = report.outcomes.len();
        info!(
            attempted = total,
            succeeded = total - failed,
            failed,
            "Export summary"
        );

        if failed > 0 {
            warn!(failed_uploads = failed, total, "Some uploads failed");
            return Err(TransferError::UploadsFailed {
                failed,
                total,
                report: Box::new(report),
            });
        }

        info!(total_secrets = total, "Successfully exported all secrets");
        Ok(report)
    }
}
