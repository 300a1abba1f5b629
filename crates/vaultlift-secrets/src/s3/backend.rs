//! S3 backend for exported secrets

use crate::error::StorageError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};
use vaultlift_core::StorageConfig;

/// Write primitive for object storage
///
/// Each call is one atomic object write: it either replaces the whole object
/// or fails without leaving a partial one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
}

/// S3 backend for object writes
pub struct S3Backend {
    client: Client,
    bucket: String,
}

impl S3Backend {
    /// Create a backend with static credentials from configuration
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "vaultlift-static",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        // Configure custom endpoint for S3-compatible storage
        if let Some(endpoint_url) = config.endpoint.as_deref() {
            debug!("Using custom S3 endpoint: {}", endpoint_url);
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true); // Required for MinIO and many S3-compatible services
        }

        let client = Client::from_conf(s3_config_builder.build());

        match config.endpoint.as_deref() {
            Some(endpoint) => info!(
                bucket = %config.bucket,
                region = %config.region,
                endpoint = %endpoint,
                "S3 backend initialized with custom endpoint"
            ),
            None => info!(
                bucket = %config.bucket,
                region = %config.region,
                "S3 backend initialized"
            ),
        }

        Self {
            client,
            bucket: config.bucket.clone(),
        }
    }

    /// Get the bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Backend {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        debug!(
            "Uploading object ({} bytes): s3://{}/{}",
            body.len(),
            self.bucket,
            key
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::put(key, DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

impl std::fmt::Debug for S3Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Backend")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}
