//! Export to S3-compatible object storage
//!
//! `ObjectStore` is the single write primitive; `S3Backend` implements it for
//! AWS S3 and S3-compatible services (MinIO, Wasabi, DigitalOcean Spaces).
//! `BulkUploader` drives many writes under a concurrency ceiling with
//! per-object retry.

pub mod backend;
pub mod uploader;

pub use backend::{ObjectStore, S3Backend};
pub use uploader::{BulkUploader, UploaderSettings, CONTENT_TYPE};
