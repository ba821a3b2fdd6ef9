//! Google Cloud Storage through the S3-compatible XML API.
//!
//! Authentication uses GCS HMAC keys. They are taken from [`GcsSettings::hmac`]
//! when set, otherwise from the standard AWS credential chain
//! (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use kanji_core::types::Timestamp;

use crate::{validate_key, ObjectInfo, ObjectStore, StorageError, StoredObject};

/// XML API endpoint for Google Cloud Storage.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// GCS ignores the region, but the SDK requires one for request signing.
const SIGNING_REGION: &str = "auto";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Connection settings for [`GcsObjectStore`].
#[derive(Clone)]
pub struct GcsSettings {
    pub bucket: String,
    pub endpoint: String,
    /// Explicit HMAC key pair `(access_id, secret)`.
    pub hmac: Option<(String, String)>,
}

impl std::fmt::Debug for GcsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcsSettings")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("hmac", &self.hmac.as_ref().map(|(id, _)| id))
            .finish()
    }
}

/// Object store backed by a GCS bucket.
#[derive(Debug, Clone)]
pub struct GcsObjectStore {
    client: Client,
    bucket: String,
}

impl GcsObjectStore {
    /// Build the SDK client. No network call is made until the first request.
    pub async fn connect(settings: &GcsSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(SIGNING_REGION))
            .endpoint_url(&settings.endpoint);

        if let Some((access_id, secret)) = &settings.hmac {
            loader = loader.credentials_provider(Credentials::new(
                access_id.clone(),
                secret.clone(),
                None,
                None,
                "gcs-hmac",
            ));
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        tracing::info!(bucket = %settings.bucket, endpoint = %settings.endpoint, "GCS client initialized");

        Self {
            client: Client::from_conf(s3_config),
            bucket: settings.bucket.clone(),
        }
    }
}

fn backend_error<E: std::error::Error>(err: E) -> StorageError {
    StorageError::Backend(DisplayErrorContext(&err).to_string())
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<Timestamp> {
    Timestamp::from_timestamp(dt.secs(), dt.subsec_nanos())
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
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
        let len = body.len() as u64;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(len)
    }

    async fn get_object(&self, key: &str) -> Result<StoredObject, StorageError> {
        validate_key(key)?;
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    StorageError::NotFound { key: key.to_string() }
                } else {
                    backend_error(err)
                }
            })?;

        let content_type = output
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = output
            .body
            .collect()
            .await
            .map_err(backend_error)?
            .into_bytes();

        Ok(StoredObject { content_type, body })
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(backend_error)?;
            for object in page.contents() {
                let Some(name) = object.key() else {
                    continue;
                };
                // GCS objects are immutable, so last-modified is creation time.
                let created = object
                    .last_modified()
                    .and_then(to_timestamp)
                    .unwrap_or_default();
                objects.push(ObjectInfo {
                    name: name.to_string(),
                    size: object.size().unwrap_or(0),
                    created,
                });
            }
        }

        tracing::debug!(bucket = %self.bucket, prefix, count = objects.len(), "Listed objects");
        Ok(objects)
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}
