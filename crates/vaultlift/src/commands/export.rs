//! Export command

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use vaultlift_core::ExportConfig;
use vaultlift_secrets::{S3Backend, TransferCoordinator, TransferError, TransferReport};

use super::{cancel_on_interrupt, connect_source};
use crate::output;

pub async fn run() -> Result<()> {
    let config = ExportConfig::from_env().context("Invalid configuration")?;

    info!(
        base_path = %config.source.base_path,
        bucket = %config.storage.bucket,
        "Starting secrets export"
    );

    let source = connect_source(&config.source).await?;
    let storage = S3Backend::new(&config.storage).await;
    let coordinator =
        TransferCoordinator::from_stores(source, Arc::new(storage), &config.source.base_path);

    let cancel = cancel_on_interrupt();
    match coordinator.run(&cancel).await {
        Ok(report) => {
            print_summary(&report);
            if report.discovered == 0 {
                output::info(format!("No secrets found under {}", config.source.base_path));
            } else {
                output::success(&format!(
                    "Exported {} secrets to s3://{}",
                    report.uploaded(),
                    config.storage.bucket
                ));
            }
            Ok(())
        }
        Err(TransferError::UploadsFailed {
            failed,
            total,
            report,
        }) => {
            print_summary(&report);
            print_failures(&report);
            Err(TransferError::UploadsFailed {
                failed,
                total,
                report,
            })
            .context("Export incomplete")
        }
        Err(e) => Err(e).context("Export failed"),
    }
}

fn print_summary(report: &TransferReport) {
    output::header("Export summary");
    output::kv("Discovered", report.discovered);
    output::kv("Retrieved", report.fetched);
    output::failures("Retrieval failures", report.fetch_failures);
    output::kv("Uploaded", report.uploaded());
    output::failures("Upload failures", report.upload_failures());
    if !report.discovery_warnings.is_empty() {
        output::kv("Discovery warnings", report.discovery_warnings.len());
    }
    println!();
}

fn print_failures(report: &TransferReport) {
    for outcome in report.failed_outcomes() {
        output::error(&format!(
            "{} -> {}: {}",
            outcome.source_path,
            outcome.destination_key,
            outcome.error.as_deref().unwrap_or("unknown error")
        ));
    }
}
