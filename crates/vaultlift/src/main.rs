//! vaultlift CLI - export Akeyless secrets to S3
//!
//! This is the main entry point for the vaultlift command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vaultlift_core::{LogConfig, LogFormat};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    // The env file must be loaded before LOG_LEVEL / LOG_FORMAT are read
    if let Some(path) = &cli.env_file {
        load_env_file(path)?;
    }

    init_tracing(&LogConfig::from_env(), cli.verbose, cli.quiet);

    match cli.command {
        Commands::Export => commands::export::run().await,
        Commands::List(args) => commands::list::run(args).await,
        Commands::Config(cmd) => commands::config::run(cmd),
    }
}

/// Load a dotenv file without overriding variables already set
fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("Failed to load environment file {}", path.display()))
}

/// Pick the filter directive: `-q` wins, then `-v`/`-vv`, then LOG_LEVEL
fn filter_directive(log: &LogConfig, verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => log.filter_directive(),
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing on stderr so command output on stdout stays parseable
fn init_tracing(log: &LogConfig, verbose: u8, quiet: bool) {
    let filter = EnvFilter::new(filter_directive(log, verbose, quiet));
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Console => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
