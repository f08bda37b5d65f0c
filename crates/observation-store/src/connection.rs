use crate::error::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Establishes a connection pool using the `DATABASE_URL` environment
/// variable.
///
/// This reads `DATABASE_URL` from the environment (loading a `.env` file if
/// one is present), creates a connection pool, and returns it. The pool can
/// be shared across the entire application.
pub async fn connect() -> Result<SqlitePool, StoreError> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| StoreError::ConnectionConfig("DATABASE_URL must be set.".to_string()))?;

    connect_with_url(&database_url).await
}

/// Establishes a connection pool for an explicit database URL, e.g.
/// `sqlite://coinwatch.db` or `sqlite::memory:`.
pub async fn connect_with_url(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        // WAL lets the scheduler's appends and the query path's reads overlap.
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!(url = database_url, "Connected to observation database");

    Ok(pool)
}
