//! # vaultlift-core
//!
//! Core library for vaultlift providing:
//! - Environment-sourced configuration with all-at-once validation
//! - Shared pipeline records (discovered items, fetched secrets, upload outcomes)
//! - Retry execution engine with policy-based backoff and cancellation

pub mod config;
pub mod error;
pub mod retry;
pub mod types;

pub use config::{ExportConfig, LogConfig, LogFormat, SourceConfig, StorageConfig};
pub use error::{Error, Result};
pub use types::{Secret, SecretItem, UploadOutcome};
