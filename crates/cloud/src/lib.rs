//! Object storage for uploaded images.
//!
//! [`ObjectStore`] is the seam handlers depend on. [`gcs::GcsObjectStore`]
//! talks to Google Cloud Storage through its S3-compatible XML API;
//! [`memory::MemoryObjectStore`] keeps objects in process for tests and
//! offline development.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use kanji_core::types::Timestamp;

pub mod error;
pub mod gcs;
pub mod memory;

pub use error::StorageError;

/// Metadata for one listed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Full object key, e.g. `uploads/<uuid>.png`.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    pub created: Timestamp,
}

/// An object read back from the store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: String,
    pub body: Bytes,
}

/// Operations on a single bucket.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket every operation targets.
    fn bucket(&self) -> &str;

    /// Write `body` under `key`, replacing any existing object. Returns the
    /// number of bytes written.
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<u64, StorageError>;

    /// Read an object. A missing key is [`StorageError::NotFound`].
    async fn get_object(&self, key: &str) -> Result<StoredObject, StorageError>;

    /// List every object whose key starts with `prefix`, following pagination
    /// until exhausted.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError>;

    /// Delete an object. No existence check is made first.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;
}

/// Reject keys no bucket should be asked for: empty, absolute, or with `.`
/// or `..` path segments.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let reason = if key.is_empty() {
        "empty"
    } else if key.starts_with('/') {
        "leading slash"
    } else if key.split('/').any(|segment| segment == ".." || segment == ".") {
        "relative path segment"
    } else {
        return Ok(());
    };
    Err(StorageError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

/// Bound a storage call by `limit`, mapping expiry to [`StorageError::Timeout`].
pub async fn with_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(StorageError::Timeout {
            operation,
            secs: limit.as_secs(),
        }),
    }
}
