//! Postgres access for the kanji catalog.
//!
//! Connection setup depends on [`AppEnv`]: local runs connect over TCP with
//! TLS required, production connects through the database proxy's Unix socket.

use std::time::Duration;

use kanji_core::environment::{AppEnv, DbTransport};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default Postgres port when `DB_PORT` is unset.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Connection parameters read from `DB_*` environment variables.
#[derive(Clone)]
pub struct DbSettings {
    /// Hostname for TCP, or the socket directory for the proxy transport.
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl std::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

impl DbSettings {
    /// Build connect options for the transport selected by `env`.
    pub fn connect_options(&self, env: AppEnv) -> PgConnectOptions {
        let base = PgConnectOptions::new()
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name);

        match env.db_transport() {
            DbTransport::Tcp => base.host(&self.host).ssl_mode(PgSslMode::Require),
            DbTransport::UnixSocket => base.socket(&self.host),
        }
    }
}

/// Create a connection pool for the given environment.
pub async fn create_pool(settings: &DbSettings, env: AppEnv) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(settings.connect_options(env))
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
