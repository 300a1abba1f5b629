//! Config command

use anyhow::{Context, Result};
use vaultlift_core::config::REDACTED;
use vaultlift_core::ExportConfig;

use crate::cli::{ConfigCommands, ConfigShowArgs};
use crate::output;

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Validate => validate(),
        ConfigCommands::Show(args) => show(args),
    }
}

fn validate() -> Result<()> {
    let config = ExportConfig::from_env().context("Configuration is invalid")?;

    output::success("Configuration is valid");
    output::kv("Gateway", &config.source.gateway_url);
    output::kv("Base path", &config.source.base_path);
    output::kv("Bucket", &config.storage.bucket);
    output::kv("Region", &config.storage.region);

    Ok(())
}

fn show(args: ConfigShowArgs) -> Result<()> {
    let config = ExportConfig::from_env().context("Configuration is invalid")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    output::header("Akeyless");
    output::kv("Access ID", &config.source.access_id);
    output::kv("Access key", REDACTED);
    output::kv("Gateway URL", &config.source.gateway_url);
    output::kv("Base path", &config.source.base_path);

    output::header("S3");
    output::kv("Region", &config.storage.region);
    output::kv("Access key ID", &config.storage.access_key_id);
    output::kv("Secret access key", REDACTED);
    output::kv("Bucket", &config.storage.bucket);
    output::kv(
        "Endpoint",
        config.storage.endpoint.as_deref().unwrap_or("(AWS default)"),
    );

    output::header("Logging");
    output::kv("Level", &config.logging.level);
    output::kv("Format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}
