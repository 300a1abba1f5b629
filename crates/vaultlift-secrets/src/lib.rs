//! Secret export pipeline for vaultlift
//!
//! Discovers every secret under a base path of a hierarchical secrets store,
//! fetches each current value, and writes one JSON object per secret to
//! S3-compatible storage.
//!
//! - **Discovery**: breadth-first walk driven by a "list children" primitive
//! - **Retrieval**: sequential, one identifier at a time
//! - **Upload**: bounded concurrency with per-item linear-backoff retry
//! - **Failure isolation**: a bad path, secret, or object never aborts the batch

pub mod classify;
pub mod discovery;
pub mod error;
pub mod fetcher;
pub mod s3;
pub mod sources;
pub mod transfer;

pub use classify::{classify, ItemKind};
pub use discovery::{Discovery, DiscoveryWarning, TreeDiscoverer};
pub use error::{SourceError, StorageError, TransferError};
pub use fetcher::{Clock, SecretFetcher};
pub use s3::{BulkUploader, ObjectStore, S3Backend, UploaderSettings};
pub use sources::{AkeylessClient, ListedItem, SecretStore};
pub use transfer::{TransferCoordinator, TransferReport};
