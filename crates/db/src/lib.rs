//! Persistence layer: connection pool, migrations, models, and repositories.

pub mod config;
pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use config::{DatabaseConfig, DatabaseSource};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool sized by the configured min/max bounds.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = config.connect_options()?;
    tracing::debug!(
        pool_min = config.pool_min,
        pool_max = config.pool_max,
        "Opening database pool"
    );
    PgPoolOptions::new()
        .min_connections(config.pool_min)
        .max_connections(config.pool_max)
        .connect_with(options)
        .await
}

/// Lightweight liveness probe.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
