//! PostgreSQL provider setup: pool, schema migrations, liveness check.
//!
//! Only [`StoreManager`](crate::StoreManager) calls into this module. The
//! repositories receive the finished `PgPool`.

use std::str::FromStr;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use formhub_core::config::DatabaseConfig;
use formhub_core::error::{AppError, ErrorKind};
use formhub_core::result::AppResult;

/// Name reported to the server in `pg_stat_activity`.
const APPLICATION_NAME: &str = "formhub";

/// Open the pool and bring the schema up to date.
pub(crate) async fn open(config: &DatabaseConfig) -> AppResult<PgPool> {
    let options = connect_options(config)?;

    info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or_default(),
        max_connections = config.max_connections,
        "Opening PostgreSQL store"
    );

    let pool = pool_options(config)
        .connect_with(options)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("PostgreSQL store ready");
    Ok(pool)
}

/// Round-trip a trivial query.
pub(crate) async fn ping(pool: &PgPool) -> AppResult<bool> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|v| v == 1)
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Health check failed", e))
}

/// Parse `database.url`. A malformed URL is a configuration problem, not a
/// storage failure, and the URL itself is never echoed back.
fn connect_options(config: &DatabaseConfig) -> AppResult<PgConnectOptions> {
    if config.url.trim().is_empty() {
        return Err(AppError::configuration(
            "database.url is required for the postgres provider",
        ));
    }

    PgConnectOptions::from_str(&config.url)
        .map(|options| options.application_name(APPLICATION_NAME))
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid database.url", e)
        })
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}
