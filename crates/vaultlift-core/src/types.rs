//! Records passed between pipeline stages

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Path separator used by the secrets namespace
pub const PATH_SEPARATOR: char = '/';

/// Suffix appended to every exported object key
pub const OBJECT_SUFFIX: &str = ".json";

/// A secret found during discovery, before its value is fetched
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretItem {
    /// Full namespace path of the secret
    pub identifier: String,
    /// Item type as reported by the secrets store
    pub declared_type: String,
}

impl SecretItem {
    pub fn new(identifier: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A fetched secret, serialized as the body of the exported object
///
/// Field order is the on-disk order: name, path, value, timestamp.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Secret {
    name: String,
    path: String,
    value: String,
    #[serde(rename = "timestamp")]
    retrieved_at: DateTime<Utc>,
}

impl Secret {
    /// Build a secret, deriving its name from the last non-empty path segment
    pub fn new(
        path: impl Into<String>,
        value: impl Into<String>,
        retrieved_at: DateTime<Utc>,
    ) -> Result<Self> {
        let path = path.into();
        let name = leaf_name(&path)
            .ok_or_else(|| Error::invalid_identifier(&path))?
            .to_string();

        Ok(Self {
            name,
            path,
            value: value.into(),
            retrieved_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }

    /// Object key this secret is exported under
    pub fn object_key(&self) -> String {
        object_key(&self.path)
    }

    /// Indented JSON document written as the object body
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("value", &"[REDACTED]")
            .field("retrieved_at", &self.retrieved_at)
            .finish()
    }
}

/// Terminal result of uploading one secret (after retries)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub source_path: String,
    pub destination_key: String,
    pub succeeded: bool,
    /// Last error message when `succeeded` is false
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn success(source_path: impl Into<String>, destination_key: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_key: destination_key.into(),
            succeeded: true,
            error: None,
        }
    }

    pub fn failure(
        source_path: impl Into<String>,
        destination_key: impl Into<String>,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            destination_key: destination_key.into(),
            succeeded: false,
            error: Some(error.to_string()),
        }
    }
}

/// Last non-empty segment of a namespace path
///
/// Trailing separators are ignored, so `/a/b/` yields `b`.
pub fn leaf_name(path: &str) -> Option<&str> {
    path.trim_end_matches(PATH_SEPARATOR)
        .rsplit(PATH_SEPARATOR)
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Derive the object key for a namespace path
///
/// Strips a leading separator and ensures the `.json` suffix.
pub fn object_key(path: &str) -> String {
    let key = path.strip_prefix(PATH_SEPARATOR).unwrap_or(path);
    if key.ends_with(OBJECT_SUFFIX) {
        key.to_string()
    } else {
        format!("{}{}", key, OBJECT_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("/env/prod/db-password"), Some("db-password"));
        assert_eq!(leaf_name("/env/prod/db-password/"), Some("db-password"));
        assert_eq!(leaf_name("token"), Some("token"));
        assert_eq!(leaf_name("/"), None);
        assert_eq!(leaf_name(""), None);
    }

    #[test]
    fn test_object_key() {
        assert_eq!(object_key("/a/b/c"), "a/b/c.json");
        assert_eq!(object_key("a/b/c.json"), "a/b/c.json");
        assert_eq!(
            object_key("/env/prod/db-password"),
            "env/prod/db-password.json"
        );
    }

    #[test]
    fn test_secret_name_derived_from_path() {
        let secret = Secret::new("/app/svc/key/", "v", fixed_time()).unwrap();
        assert_eq!(secret.name(), "key");
        assert_eq!(secret.path(), "/app/svc/key/");
        assert!(!secret.name().contains(PATH_SEPARATOR));
    }

    #[test]
    fn test_secret_rejects_nameless_path() {
        let err = Secret::new("/", "v", fixed_time()).unwrap_err();
        assert_eq!(err, Error::invalid_identifier("/"));
    }

    #[test]
    fn test_json_body_field_order_and_format() {
        let secret = Secret::new("/app/db", "hunter2", fixed_time()).unwrap();
        let body = String::from_utf8(secret.to_json_pretty().unwrap()).unwrap();

        assert_eq!(
            body,
            "{\n  \"name\": \"db\",\n  \"path\": \"/app/db\",\n  \"value\": \"hunter2\",\n  \"timestamp\": \"2025-03-14T09:26:53Z\"\n}"
        );
    }

    #[test]
    fn test_debug_hides_value() {
        let secret = Secret::new("/app/db", "hunter2", fixed_time()).unwrap();
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = UploadOutcome::success("/a", "a.json");
        assert!(ok.succeeded);
        assert!(ok.error.is_none());

        let failed = UploadOutcome::failure("/a", "a.json", "access denied");
        assert!(!failed.succeeded);
        assert_eq!(failed.error.as_deref(), Some("access denied"));
    }
}
