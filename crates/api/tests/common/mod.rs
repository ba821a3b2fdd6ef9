#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kanji_api::config::ServerConfig;
use kanji_api::router::build_app_router;
use kanji_api::state::AppState;
use kanji_cloud::memory::MemoryObjectStore;
use kanji_cloud::{ObjectInfo, ObjectStore, StorageError, StoredObject};
use kanji_core::environment::AppEnv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "kanji-test-bucket";

/// Base64 of 32 bytes of `0x07`.
pub const TEST_CSRF_KEY: &str = "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc=";

const MULTIPART_BOUNDARY: &str = "kanji-test-boundary";

/// Build a test `ServerConfig` for the given environment.
pub fn test_config(app_env: AppEnv) -> ServerConfig {
    test_config_with(app_env, &[])
}

/// Like [`test_config`], with `overrides` replacing or adding variables.
pub fn test_config_with(app_env: AppEnv, overrides: &[(&'static str, &str)]) -> ServerConfig {
    let mut vars: HashMap<&str, String> = [
        ("HOST", "127.0.0.1".to_string()),
        ("PORT", "0".to_string()),
        ("APP_ENV", app_env.as_str().to_string()),
        ("DB_HOST", "localhost".to_string()),
        ("DB_USER", "kanji".to_string()),
        ("DB_PASSWORD", "kanji".to_string()),
        ("DB_NAME", "kanji_go".to_string()),
        ("BUCKET_NAME", TEST_BUCKET.to_string()),
        ("STORAGE_BACKEND", "memory".to_string()),
        ("CSRF_KEY", TEST_CSRF_KEY.to_string()),
        ("REQUEST_TIMEOUT_SECS", "30".to_string()),
        (
            "STATIC_DIR",
            concat!(env!("CARGO_MANIFEST_DIR"), "/../../static").to_string(),
        ),
    ]
    .into_iter()
    .collect();
    for (key, value) in overrides {
        vars.insert(key, value.to_string());
    }

    ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("test config is valid")
}

/// A pool that never connects until used; for tests that do not touch the
/// database.
pub fn lazy_pool() -> PgPool {
    let config = test_config(AppEnv::Local);
    PgPoolOptions::new().connect_lazy_with(config.db.connect_options(AppEnv::Local))
}

/// A pool whose every connection attempt goes to a non-routable address, so
/// queries hang until the handler's database timeout fires.
pub fn unreachable_pool() -> PgPool {
    let mut config = test_config(AppEnv::Local);
    config.db.host = "10.255.255.1".into();
    PgPoolOptions::new().connect_lazy_with(config.db.connect_options(AppEnv::Local))
}

/// Build the full application router over an in-memory object store.
pub fn build_test_app(pool: PgPool, app_env: AppEnv) -> (Router, Arc<MemoryObjectStore>) {
    let store = Arc::new(MemoryObjectStore::new(TEST_BUCKET));
    let app = build_app_with(pool, test_config(app_env), store.clone());
    (app, store)
}

/// Build the full application router over any store and config.
pub fn build_app_with(pool: PgPool, config: ServerConfig, store: Arc<dyn ObjectStore>) -> Router {
    let state = AppState::new(pool, config.clone(), store).expect("embedded template is valid");
    build_app_router(state, &config)
}

/// Router for storage and page tests in `LOCAL` mode.
pub fn build_local_app() -> (Router, Arc<MemoryObjectStore>) {
    build_test_app(lazy_pool(), AppEnv::Local)
}

/// Object store whose every call fails with a backend error. Counts calls so
/// tests can check nothing was retried or cleaned up.
#[derive(Debug, Default)]
pub struct FailingObjectStore {
    pub puts: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl FailingObjectStore {
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

fn backend_down() -> StorageError {
    StorageError::Backend("connection reset by peer".into())
}

#[async_trait::async_trait]
impl ObjectStore for FailingObjectStore {
    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    async fn put_object(
        &self,
        _key: &str,
        _body: Bytes,
        _content_type: &str,
    ) -> Result<u64, StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(backend_down())
    }

    async fn get_object(&self, _key: &str) -> Result<StoredObject, StorageError> {
        Err(backend_down())
    }

    async fn list_objects(&self, _prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        Err(backend_down())
    }

    async fn delete_object(&self, _key: &str) -> Result<(), StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Err(backend_down())
    }
}

/// `LOCAL` router whose object store always fails.
pub fn build_failing_store_app() -> (Router, Arc<FailingObjectStore>) {
    let store = Arc::new(FailingObjectStore::default());
    let app = build_app_with(lazy_pool(), test_config(AppEnv::Local), store.clone());
    (app, store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST an urlencoded form.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    send(app, form_request(uri).body(Body::from(form.to_string())).unwrap()).await
}

/// Request builder for an urlencoded POST, for tests that add headers.
pub fn form_request(uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
}

/// One multipart part: field name, optional filename, content.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn text_part<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        filename: None,
        data: value.as_bytes(),
    }
}

pub fn file_part<'a>(name: &'a str, filename: &'a str, data: &'a [u8]) -> Part<'a> {
    Part {
        name,
        filename: Some(filename),
        data,
    }
}

/// Encode `parts` as a `multipart/form-data` body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal valid PNG signature followed by padding to `len` bytes.
pub fn fake_png(len: usize) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    data.resize(len.max(data.len()), 0);
    data
}
