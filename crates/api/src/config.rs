use std::path::PathBuf;
use std::str::FromStr;

use kanji_cloud::gcs::{GcsSettings, DEFAULT_ENDPOINT};
use kanji_core::csrf::{self, KEY_LEN};
use kanji_core::environment::{AppEnv, PROD_CORS_ORIGINS};
use kanji_db::{DbSettings, DEFAULT_DB_PORT};

/// Bucket used when `BUCKET_NAME` is unset.
pub const DEFAULT_BUCKET_NAME: &str = "default-bucket-name";

/// Errors raised while reading configuration at startup. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Which [`kanji_cloud::ObjectStore`] implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Gcs,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gcs" => Ok(StorageBackend::Gcs),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown backend '{other}', expected gcs or memory")),
        }
    }
}

/// Object storage settings.
#[derive(Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub endpoint: String,
    /// `GCS_HMAC_ACCESS_ID` / `GCS_HMAC_SECRET`, when both are set.
    pub hmac: Option<(String, String)>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("backend", &self.backend)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("hmac", &self.hmac.as_ref().map(|(id, _)| id))
            .finish()
    }
}

impl StorageConfig {
    /// Read the `BUCKET_NAME`, `STORAGE_BACKEND`, `GCS_*` variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bucket = var("BUCKET_NAME").unwrap_or_else(|| {
            tracing::warn!("BUCKET_NAME not set, using {DEFAULT_BUCKET_NAME}");
            DEFAULT_BUCKET_NAME.into()
        });
        let backend = match var("STORAGE_BACKEND") {
            Some(raw) => raw.parse().map_err(|message| ConfigError::Invalid {
                var: "STORAGE_BACKEND",
                message,
            })?,
            None => StorageBackend::Gcs,
        };

        Ok(Self {
            backend,
            bucket,
            endpoint: var("GCS_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            hmac: var("GCS_HMAC_ACCESS_ID").zip(var("GCS_HMAC_SECRET")),
        })
    }

    pub fn gcs_settings(&self) -> GcsSettings {
        GcsSettings {
            bucket: self.bucket.clone(),
            endpoint: self.endpoint.clone(),
            hmac: self.hmac.clone(),
        }
    }
}

/// CSRF signing key and where it came from.
#[derive(Clone)]
pub struct CsrfConfig {
    pub key: [u8; KEY_LEN],
    /// `true` when no `CSRF_KEY` was configured and a random one was made.
    pub generated: bool,
}

impl std::fmt::Debug for CsrfConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfConfig")
            .field("generated", &self.generated)
            .finish_non_exhaustive()
    }
}

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// `LOCAL` or `PROD`; selects CORS, CSRF and DB transport policy.
    pub app_env: AppEnv,
    pub db: DbSettings,
    pub storage: StorageConfig,
    pub csrf: CsrfConfig,
    /// Allowed CORS origins. Only consulted in `PROD`; `LOCAL` allows any origin.
    pub cors_origins: Vec<String>,
    /// Outer HTTP request timeout in seconds (default: `90`).
    pub request_timeout_secs: u64,
    /// Bound on each database call made by a handler, in seconds (default: `30`).
    pub db_timeout_secs: u64,
    /// Directory served under `/static` (default: `static`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `8080`                             |
    /// | `APP_ENV`              | `LOCAL`                            |
    /// | `DB_HOST`              | required                           |
    /// | `DB_PORT`              | `5432`                             |
    /// | `DB_USER`              | required                           |
    /// | `DB_PASSWORD`          | empty                              |
    /// | `DB_NAME`              | required                           |
    /// | `DB_MAX_CONNECTIONS`   | `10`                               |
    /// | `BUCKET_NAME`          | `default-bucket-name`              |
    /// | `STORAGE_BACKEND`      | `gcs`                              |
    /// | `GCS_ENDPOINT`         | `https://storage.googleapis.com`   |
    /// | `CSRF_KEY`             | random in `LOCAL`, required in `PROD` |
    /// | `CORS_ORIGINS`         | the production origins             |
    /// | `REQUEST_TIMEOUT_SECS` | `90`                               |
    /// | `DB_TIMEOUT_SECS`      | `30`                               |
    /// | `STATIC_DIR`           | `static`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 8080u16)?;

        let app_env = match var("APP_ENV") {
            Some(raw) => raw.parse::<AppEnv>().map_err(|e| ConfigError::Invalid {
                var: "APP_ENV",
                message: e.to_string(),
            })?,
            None => AppEnv::default(),
        };

        let db = DbSettings {
            host: var("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?,
            port: parse_or("DB_PORT", var("DB_PORT"), DEFAULT_DB_PORT)?,
            user: var("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: var("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 10u32)?,
        };

        let storage = StorageConfig::from_lookup(&lookup)?;

        let csrf = match var("CSRF_KEY") {
            Some(encoded) => CsrfConfig {
                key: csrf::decode_key(&encoded).map_err(|e| ConfigError::Invalid {
                    var: "CSRF_KEY",
                    message: e.to_string(),
                })?,
                generated: false,
            },
            None if app_env.is_prod() => return Err(ConfigError::Missing("CSRF_KEY")),
            None => {
                tracing::warn!("CSRF_KEY not set, generating a temporary key");
                CsrfConfig {
                    key: csrf::generate_key(),
                    generated: true,
                }
            }
        };

        let cors_origins: Vec<String> = match var("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => PROD_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 90u64)?;
        let db_timeout_secs = parse_or("DB_TIMEOUT_SECS", var("DB_TIMEOUT_SECS"), 30u64)?;
        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        Ok(Self {
            host,
            port,
            app_env,
            db,
            storage,
            csrf,
            cors_origins,
            request_timeout_secs,
            db_timeout_secs,
            static_dir,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}
