//! Environment-sourced configuration
//!
//! All settings come from process environment variables. Loading goes through
//! a lookup closure so callers (and tests) can supply any key/value source;
//! [`ExportConfig::from_env`] is the production entry point.
//!
//! Validation reports every missing required variable in a single error.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Environment variable names
pub mod vars {
    pub const AKEYLESS_ACCESS_ID: &str = "AKEYLESS_ACCESS_ID";
    pub const AKEYLESS_ACCESS_KEY: &str = "AKEYLESS_ACCESS_KEY";
    pub const AKEYLESS_GATEWAY_URL: &str = "AKEYLESS_GATEWAY_URL";
    pub const BASE_PATH: &str = "BASE_PATH";
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
    pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
    pub const S3_BUCKET: &str = "S3_BUCKET";
    pub const S3_ENDPOINT: &str = "S3_ENDPOINT";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

const DEFAULT_BASE_PATH: &str = "/";
const DEFAULT_LOG_LEVEL: &str = "info";
/// Placeholder printed in place of credentials
pub const REDACTED: &str = "********";

/// Complete exporter configuration
#[derive(Debug, Clone, Serialize)]
pub struct ExportConfig {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub logging: LogConfig,
}

/// Secrets-source (Akeyless) settings
#[derive(Clone, Serialize)]
pub struct SourceConfig {
    pub access_id: String,
    #[serde(serialize_with = "redact")]
    pub access_key: String,
    pub gateway_url: String,
    pub base_path: String,
}

/// Object-storage (S3) settings
#[derive(Clone, Serialize)]
pub struct StorageConfig {
    pub region: String,
    pub access_key_id: String,
    #[serde(serialize_with = "redact")]
    pub secret_access_key: String,
    pub bucket: String,
    pub endpoint: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output
    Console,
    /// One JSON object per line
    Json,
}

impl ExportConfig {
    /// Load and validate configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let access_id = required(vars::AKEYLESS_ACCESS_ID);
        let access_key = required(vars::AKEYLESS_ACCESS_KEY);
        let gateway_url = required(vars::AKEYLESS_GATEWAY_URL);
        let region = required(vars::AWS_REGION);
        let access_key_id = required(vars::AWS_ACCESS_KEY_ID);
        let secret_access_key = required(vars::AWS_SECRET_ACCESS_KEY);
        let bucket = required(vars::S3_BUCKET);

        if !missing.is_empty() {
            return Err(Error::missing_variables(missing));
        }

        let endpoint = get(vars::S3_ENDPOINT);
        ensure_http_url(vars::AKEYLESS_GATEWAY_URL, &gateway_url)?;
        if let Some(endpoint) = &endpoint {
            ensure_http_url(vars::S3_ENDPOINT, endpoint)?;
        }

        Ok(Self {
            source: SourceConfig {
                access_id,
                access_key,
                gateway_url,
                base_path: get(vars::BASE_PATH).unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            },
            storage: StorageConfig {
                region,
                access_key_id,
                secret_access_key,
                bucket,
                endpoint,
            },
            logging: LogConfig::from_lookup(&lookup),
        })
    }
}

impl LogConfig {
    /// Read logging settings from the process environment
    ///
    /// Never fails so logging can be set up before the full config is validated.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(vars::LOG_LEVEL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let format = match lookup(vars::LOG_FORMAT) {
            Some(f) if !f.trim().is_empty() && !f.trim().eq_ignore_ascii_case("console") => {
                LogFormat::Json
            }
            _ => LogFormat::Console,
        };
        Self { level, format }
    }

    /// Map the configured level onto a tracing filter directive
    ///
    /// Unknown levels fall back to `info`; `fatal` maps to `error`.
    pub fn filter_directive(&self) -> &'static str {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" | "warning" => "warn",
            "error" | "fatal" => "error",
            _ => "info",
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Console,
        }
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("access_id", &self.access_id)
            .field("access_key", &REDACTED)
            .field("gateway_url", &self.gateway_url)
            .field("base_path", &self.base_path)
            .finish()
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &REDACTED)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn redact<S: serde::Serializer>(_value: &str, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

fn ensure_http_url(name: &str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::invalid_value(name, "must be an http:// or https:// URL"))
    }
}
