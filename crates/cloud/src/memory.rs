//! In-process object store for tests and offline development.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use kanji_core::types::Timestamp;
use tokio::sync::RwLock;

use crate::{validate_key, ObjectInfo, ObjectStore, StorageError, StoredObject};

#[derive(Debug, Clone)]
struct Entry {
    content_type: String,
    body: Bytes,
    created: Timestamp,
}

/// Bucket held in a sorted map, so listings come back in key order like GCS.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: RwLock<BTreeMap<String, Entry>>,
    put_calls: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    /// Number of `put_object` calls made so far, successful or not.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::Relaxed)
    }

    /// Whether an object exists under `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<u64, StorageError> {
        validate_key(key)?;
        self.put_calls.fetch_add(1, Ordering::Relaxed);
        let len = body.len() as u64;
        self.objects.write().await.insert(
            key.to_string(),
            Entry {
                content_type: content_type.to_string(),
                body,
                created: chrono::Utc::now(),
            },
        );
        Ok(len)
    }

    async fn get_object(&self, key: &str) -> Result<StoredObject, StorageError> {
        validate_key(key)?;
        let objects = self.objects.read().await;
        let entry = objects.get(key).ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;
        Ok(StoredObject {
            content_type: entry.content_type.clone(),
            body: entry.body.clone(),
        })
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, entry)| ObjectInfo {
                name: name.clone(),
                size: entry.body.len() as i64,
                created: entry.created,
            })
            .collect())
    }

    /// Missing keys fail, matching the GCS JSON API's 404 on delete.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match self.objects.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
        }
    }
}
