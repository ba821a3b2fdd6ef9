use std::sync::Arc;

use kanji_cloud::gcs::GcsObjectStore;
use kanji_cloud::memory::MemoryObjectStore;
use kanji_cloud::ObjectStore;
use kanji_core::csrf::CsrfSigner;

use crate::config::{ServerConfig, StorageBackend, StorageConfig};
use crate::views::{TemplateError, Templates};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kanji_db::DbPool,
    /// Server configuration, resolved once at startup.
    pub config: Arc<ServerConfig>,
    /// Object store for uploaded images, constructed before the server starts.
    pub store: Arc<dyn ObjectStore>,
    /// Validated page template.
    pub templates: Arc<Templates>,
    /// CSRF token signer keyed with `CSRF_KEY`.
    pub csrf: CsrfSigner,
}

impl AppState {
    /// Assemble state, validating the embedded page template.
    pub fn new(
        pool: kanji_db::DbPool,
        config: ServerConfig,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self, TemplateError> {
        let templates = Templates::load()?;
        let csrf = CsrfSigner::new(config.csrf.key);
        Ok(Self {
            pool,
            config: Arc::new(config),
            store,
            templates: Arc::new(templates),
            csrf,
        })
    }
}

/// Construct the configured object store.
pub async fn connect_object_store(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config.backend {
        StorageBackend::Gcs => Arc::new(GcsObjectStore::connect(&config.gcs_settings()).await),
        StorageBackend::Memory => {
            tracing::warn!(bucket = %config.bucket, "Using in-memory object store; uploads are not persisted");
            Arc::new(MemoryObjectStore::new(config.bucket.clone()))
        }
    }
}
