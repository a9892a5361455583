//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::{Migrate, Migrator};
use tracing::info;

use assetdesk_core::error::{AppError, ErrorKind};
use assetdesk_core::result::AppResult;

/// Migrations compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Run all pending migrations and return how many were applied.
pub async fn run_migrations(pool: &PgPool) -> AppResult<usize> {
    let pending = pending_migrations(pool).await?;
    if pending.is_empty() {
        info!("Database schema is up to date");
        return Ok(0);
    }

    for (version, description) in &pending {
        info!(version, description = %description, "Applying migration");
    }

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!(applied = pending.len(), "Database migrations completed");
    Ok(pending.len())
}

/// `(version, description)` of every embedded migration not yet applied.
pub async fn pending_migrations(pool: &PgPool) -> AppResult<Vec<(i64, String)>> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e))?;

    conn.ensure_migrations_table().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to create migrations table", e)
    })?;

    let applied = conn.list_applied_migrations().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to list applied migrations", e)
    })?;

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.iter().any(|a| a.version == m.version))
        .map(|m| (m.version, m.description.to_string()))
        .collect())
}
