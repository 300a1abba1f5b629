//! Error types for the export pipeline

use thiserror::Error;

/// Errors raised by a secrets store
#[derive(Error, Debug)]
pub enum SourceError {
    /// Access credentials were rejected or no token was issued
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// HTTP request could not be completed
    #[error("request to secrets store failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Store responded without the requested key
    #[error("secret not found: {path}")]
    NotFound { path: String },

    /// Any other transport-level failure
    #[error("secrets store unavailable: {0}")]
    Transport(String),

    /// Identifier cannot be turned into a secret record
    #[error(transparent)]
    Identifier(#[from] vaultlift_core::Error),

    #[error("operation cancelled")]
    Cancelled,
}

impl SourceError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The store could not be reached or answered unusably
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Status { .. } | Self::Decode { .. } | Self::Transport(_)
        )
    }
}

/// Errors raised by an object store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to serialize secret: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to put object {key}: {message}")]
    Put { key: String, message: String },

    #[error("operation cancelled")]
    Cancelled,
}

impl StorageError {
    pub fn put(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Put {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Whole-run failures reported by the transfer coordinator
#[derive(Error, Debug)]
pub enum TransferError {
    /// Discovery found secrets but none could be fetched
    #[error("no secrets could be retrieved ({failed} of {discovered} fetches failed)")]
    NothingFetched { discovered: usize, failed: usize },

    /// At least one upload still failed after retries
    #[error("{failed} out of {total} uploads failed")]
    UploadsFailed {
        failed: usize,
        total: usize,
        report: Box<crate::transfer::TransferReport>,
    },

    /// Cancellation fired before the upload stage started
    #[error("export cancelled during {stage}")]
    Cancelled { stage: &'static str },
}
