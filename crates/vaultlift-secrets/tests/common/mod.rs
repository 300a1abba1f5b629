//! Shared fakes for vaultlift-secrets integration tests
//!
//! - `InMemoryStore`: a namespace tree answering list and get calls
//! - `RecordingObjectStore`: an object store that records writes, can fail a
//!   key a set number of times, and can delay a key to reorder completion

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vaultlift_secrets::{Clock, ListedItem, ObjectStore, SecretStore, SourceError, StorageError};

/// Fixed retrieval time used across tests
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
}

pub fn fixed_clock() -> Clock {
    Arc::new(fixed_time)
}

pub fn folder(name: &str) -> ListedItem {
    ListedItem::new(name, "folder")
}

pub fn static_secret(name: &str) -> ListedItem {
    ListedItem::new(name, "static-secret")
}

// ─── Secrets store ───────────────────────────────────────────────────────────

/// Namespace tree keyed by listing path; the root is stored under "/"
#[derive(Default)]
pub struct InMemoryStore {
    children: HashMap<String, Vec<ListedItem>>,
    values: HashMap<String, String>,
    failing_lists: HashSet<String>,
    failing_values: HashSet<String>,
    cancel_on_get: Option<(String, CancellationToken)>,
    list_calls: Mutex<Vec<Option<String>>>,
    get_calls: Mutex<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, path: &str, items: Vec<ListedItem>) -> Self {
        self.children.insert(path.to_string(), items);
        self
    }

    pub fn with_value(mut self, identifier: &str, value: &str) -> Self {
        self.values.insert(identifier.to_string(), value.to_string());
        self
    }

    /// Listing `path` returns a transport error
    pub fn failing_list(mut self, path: &str) -> Self {
        self.failing_lists.insert(path.to_string());
        self
    }

    /// Fetching `identifier` returns a transport error
    pub fn failing_value(mut self, identifier: &str) -> Self {
        self.failing_values.insert(identifier.to_string());
        self
    }

    /// Fetching `identifier` fires `token` before answering
    pub fn cancelling_on_get(mut self, identifier: &str, token: CancellationToken) -> Self {
        self.cancel_on_get = Some((identifier.to_string(), token));
        self
    }

    /// Filters passed to `list_children`, in call order
    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretStore for InMemoryStore {
    async fn list_children(&self, path: Option<&str>) -> Result<Vec<ListedItem>, SourceError> {
        self.list_calls
            .lock()
            .unwrap()
            .push(path.map(str::to_string));

        let key = path.unwrap_or("/");
        if self.failing_lists.contains(key) {
            return Err(SourceError::transport(format!("listing {} refused", key)));
        }
        Ok(self.children.get(key).cloned().unwrap_or_default())
    }

    async fn get_value(&self, identifier: &str) -> Result<Option<String>, SourceError> {
        self.get_calls.lock().unwrap().push(identifier.to_string());

        if let Some((target, token)) = &self.cancel_on_get {
            if target == identifier {
                token.cancel();
            }
        }

        if self.failing_values.contains(identifier) {
            return Err(SourceError::transport("connection reset"));
        }
        Ok(self.values.get(identifier).cloned())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

// ─── Object store ────────────────────────────────────────────────────────────

/// One stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Object store that keeps every successful write in memory
#[derive(Default)]
pub struct RecordingObjectStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    /// Number of leading attempts that fail, per key
    failures: HashMap<String, u32>,
    delays: HashMap<String, Duration>,
    attempts: Mutex<HashMap<String, u32>>,
    completion_order: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `times` writes of `key`
    pub fn failing(mut self, key: &str, times: u32) -> Self {
        self.failures.insert(key.to_string(), times);
        self
    }

    /// Every write of `key` fails
    pub fn always_failing(self, key: &str) -> Self {
        self.failing(key, u32::MAX)
    }

    /// Each write of `key` takes `delay` before completing
    pub fn delayed(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn objects(&self) -> BTreeMap<String, StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn body(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|o| String::from_utf8(o.body.clone()).unwrap())
    }

    pub fn attempts(&self, key: &str) -> u32 {
        self.attempts.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    /// Keys in the order their writes finished
    pub fn completion_order(&self) -> Vec<String> {
        self.completion_order.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(key.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        let result = match self.failures.get(key) {
            Some(times) if attempt <= *times => Err(StorageError::put(key, "access denied")),
            _ => {
                self.objects.lock().unwrap().insert(
                    key.to_string(),
                    StoredObject {
                        body,
                        content_type: content_type.to_string(),
                    },
                );
                Ok(())
            }
        };

        self.completion_order.lock().unwrap().push(key.to_string());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
