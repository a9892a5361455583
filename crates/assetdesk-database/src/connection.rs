//! PostgreSQL pool setup for the record stores.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use assetdesk_core::config::database::DatabaseConfig;
use assetdesk_core::error::{AppError, ErrorKind};
use assetdesk_core::result::AppResult;

/// Pool sizing and timeouts from the `database` config section.
fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Open the pool behind the PostgreSQL record stores.
pub async fn open_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    if config.url.trim().is_empty() {
        return Err(AppError::configuration(
            "database.url is required for the postgres record store",
        ));
    }

    let target = redact_url(&config.url);
    info!(
        url = %target,
        max_connections = config.max_connections,
        "Opening record store pool"
    );

    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Record store at {target} is unreachable"),
                e,
            )
        })?;

    info!(url = %target, "Record store pool ready");
    Ok(pool)
}

/// Round-trip a trivial query through the pool.
pub async fn ping(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Record store ping failed", e))
}

/// Replace the password in a connection URL with `****` so the URL can be
/// logged or printed.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
