//! Secrets store trait and implementations

pub mod akeyless;

use crate::error::SourceError;
use async_trait::async_trait;

/// One child returned when listing a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    /// Full path of the child
    pub name: String,
    /// Type as reported by the store
    pub item_type: String,
}

impl ListedItem {
    pub fn new(name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
        }
    }
}

/// Trait for hierarchical secrets stores
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List the direct children of a path
    ///
    /// `None` lists from the namespace root without a path filter.
    /// Pagination is resolved by the implementation.
    async fn list_children(&self, path: Option<&str>) -> Result<Vec<ListedItem>, SourceError>;

    /// Get the current value of one secret
    ///
    /// Returns Ok(None) if the store responded without the requested key.
    async fn get_value(&self, identifier: &str) -> Result<Option<String>, SourceError>;

    /// Store name for log messages
    fn name(&self) -> &'static str;
}

pub use akeyless::AkeylessClient;
