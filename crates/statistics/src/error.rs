use observation_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No stored observations for asset '{0}'")]
    NoData(String),

    #[error("Failed to read observation history: {0}")]
    Store(#[from] StoreError),
}
