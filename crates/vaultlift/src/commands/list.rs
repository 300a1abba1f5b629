//! List command: discovery only, no values fetched

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use vaultlift_core::ExportConfig;
use vaultlift_secrets::{DiscoveryWarning, TreeDiscoverer};

use super::{cancel_on_interrupt, connect_source};
use crate::cli::ListArgs;
use crate::output;

#[derive(Serialize)]
struct ListEntry<'a> {
    path: &'a str,
    item_type: &'a str,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let config = ExportConfig::from_env().context("Invalid configuration")?;
    let source = connect_source(&config.source).await?;

    let spinner = output::spinner("Discovering secrets...");
    let discovery = TreeDiscoverer::new(source)
        .discover(&config.source.base_path, &cancel_on_interrupt())
        .await;
    spinner.finish_and_clear();
    let discovery = discovery.map_err(|e| anyhow!("Discovery failed: {}", e))?;

    if args.json {
        let entries: Vec<ListEntry<'_>> = discovery
            .items
            .iter()
            .map(|item| ListEntry {
                path: &item.identifier,
                item_type: &item.declared_type,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if discovery.items.is_empty() {
        output::info(&format!(
            "No secrets found under {}",
            config.source.base_path
        ));
    } else {
        output::header(&format!(
            "{} secrets under {}",
            discovery.items.len(),
            config.source.base_path
        ));
        for item in &discovery.items {
            println!("  {}  ({})", item.identifier, item.declared_type);
        }
    }

    for warning in &discovery.warnings {
        output::warning(&describe(warning));
    }

    Ok(())
}

fn describe(warning: &DiscoveryWarning) -> String {
    match warning {
        DiscoveryWarning::ListFailed { path, error } => {
            format!("Could not list {}: {}", path, error)
        }
        DiscoveryWarning::Unrecognized { name, item_type } => {
            format!("Skipped {} (unsupported type {})", name, item_type)
        }
        DiscoveryWarning::Revisited { path } => format!("Folder {} reached twice", path),
    }
}
