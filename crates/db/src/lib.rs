//! Persistence layer: connection pool, embedded migrations, models, and
//! repositories for the `contact_submissions` table.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;

/// Alias so downstream crates don't depend on sqlx types directly.
pub type DbPool = PgPool;

/// Embedded migrations.
///
/// `0001` creates `contact_submissions` without the soft-delete column;
/// `0002` adds `deleted_at`. A database with only `0001` applied is the
/// "migration required" state the admin API has to degrade around.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create a connection pool against the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations.
///
/// Not called unconditionally at startup: applying `0002` is a deliberate
/// operator action, since its absence is a supported (degraded) mode.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
