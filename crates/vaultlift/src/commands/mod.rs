//! CLI command implementations

pub mod config;
pub mod export;
pub mod list;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use vaultlift_core::SourceConfig;
use vaultlift_secrets::AkeylessClient;

use crate::output;

/// Cancellation token that fires on Ctrl-C
///
/// In-flight calls are abandoned and reported as failures; nothing already
/// written is rolled back.
fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling export");
            token.cancel();
        }
    });
    cancel
}

/// Authenticate against the Akeyless gateway
async fn connect_source(config: &SourceConfig) -> Result<Arc<AkeylessClient>> {
    let spinner = output::spinner("Authenticating with Akeyless...");
    let client =
        AkeylessClient::authenticate(&config.gateway_url, &config.access_id, &config.access_key)
            .await;
    spinner.finish_and_clear();

    let client = client.with_context(|| {
        format!("Failed to authenticate with Akeyless at {}", config.gateway_url)
    })?;
    Ok(Arc::new(client))
}
