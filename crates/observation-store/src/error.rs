use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to load environment variables for the store connection: {0}")]
    ConnectionConfig(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid persisted data: {0}")]
    InvalidRow(String),
}
