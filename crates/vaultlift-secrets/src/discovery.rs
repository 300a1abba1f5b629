//! Breadth-first discovery of secrets under a base path
//!
//! The namespace is only reachable through "list children of a path", so the
//! walk keeps an explicit frontier queue instead of recursing. A path that
//! cannot be listed is skipped and the walk continues with the rest.

use crate::classify::{classify, ItemKind};
use crate::error::SourceError;
use crate::sources::SecretStore;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use vaultlift_core::types::PATH_SEPARATOR;
use vaultlift_core::SecretItem;

/// Result of one discovery run
#[derive(Debug, Default)]
pub struct Discovery {
    /// Exportable secrets, in breadth-first order
    pub items: Vec<SecretItem>,
    /// Non-fatal problems encountered along the way
    pub warnings: Vec<DiscoveryWarning>,
    /// Number of paths that were listed (including the root)
    pub containers_visited: usize,
}

/// Non-fatal discovery events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryWarning {
    /// Listing this path failed; its subtree was not explored
    ListFailed { path: String, error: String },
    /// Item type is neither a container nor an exportable secret
    Unrecognized { name: String, item_type: String },
    /// Container was reached a second time and not explored again
    Revisited { path: String },
}

/// Walks the namespace from a root path
pub struct TreeDiscoverer {
    store: Arc<dyn SecretStore>,
}

impl TreeDiscoverer {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Discover every exportable secret reachable from `root`
    ///
    /// Only cancellation makes this fail; per-path errors become warnings.
    pub async fn discover(
        &self,
        root: &str,
        cancel: &CancellationToken,
    ) -> Result<Discovery, SourceError> {
        info!(store = self.store.name(), base_path = %root, "Starting secret discovery");

        let mut discovery = Discovery::default();
        let mut frontier: VecDeque<String> = VecDeque::from([root.to_string()]);
        let mut explored: HashSet<String> = HashSet::from([normalize(root).to_string()]);
        let mut seen_secrets: HashSet<String> = HashSet::new();

        while let Some(path) = frontier.pop_front() {
            if cancel.is_cancelled() {
                warn!(path = %path, "Discovery cancelled");
                return Err(SourceError::Cancelled);
            }

            let filter = path_filter(&path);
            debug!(path = %path, filter = ?filter, "Listing items in path");

            let listed = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SourceError::Cancelled),
                listed = self.store.list_children(filter) => listed,
            };
            discovery.containers_visited += 1;

            let children = match listed {
                Ok(children) => children,
                Err(e) => {
                    error!(
                        store = self.store.name(),
                        path = %path,
                        error = %e,
                        "Failed to list items in path, skipping"
                    );
                    discovery.warnings.push(DiscoveryWarning::ListFailed {
                        path,
                        error: e.to_string(),
                    });
                    continue;
                }
            };
            debug!(path = %path, items_count = children.len(), "Retrieved items from path");

            for child in children {
                match classify(&child.item_type) {
                    ItemKind::Container => {
                        if explored.insert(normalize(&child.name).to_string()) {
                            debug!(folder = %child.name, "Found folder, will explore");
                            frontier.push_back(child.name);
                        } else {
                            warn!(folder = %child.name, "Folder already explored, skipping");
                            discovery
                                .warnings
                                .push(DiscoveryWarning::Revisited { path: child.name });
                        }
                    }
                    ItemKind::Secret => {
                        if seen_secrets.insert(child.name.clone()) {
                            debug!(secret = %child.name, item_type = %child.item_type, "Found secret");
                            discovery
                                .items
                                .push(SecretItem::new(child.name, child.item_type));
                        }
                    }
                    ItemKind::Unrecognized => {
                        warn!(
                            item_name = %child.name,
                            item_type = %child.item_type,
                            "Skipping item - not a recognized secret type"
                        );
                        discovery.warnings.push(DiscoveryWarning::Unrecognized {
                            name: child.name,
                            item_type: child.item_type,
                        });
                    }
                }
            }
        }

        info!(
            count = discovery.items.len(),
            containers = discovery.containers_visited,
            warnings = discovery.warnings.len(),
            "Finished secret discovery"
        );
        Ok(discovery)
    }
}

/// Path filter passed to the store; the root is listed without one
pub fn path_filter(path: &str) -> Option<&str> {
    if path.is_empty() || path == "/" {
        None
    } else {
        Some(path)
    }
}

/// Key used to remember explored containers (`/a/b/` and `/a/b` are one)
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches(PATH_SEPARATOR);
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
