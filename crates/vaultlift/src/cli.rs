//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// vaultlift - export Akeyless secrets to S3
#[derive(Parser, Debug)]
#[command(name = "vaultlift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides --verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Load environment variables from a dotenv file first
    ///
    /// Variables already set in the environment win over file entries.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every secret under BASE_PATH to the S3 bucket
    Export,

    /// Discover secrets under BASE_PATH without fetching values
    List(ListArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Check that every required variable is set
    Validate,

    /// Show the effective configuration with credentials redacted
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
