use market_client::ProviderError;
use observation_store::StoreError;
use thiserror::Error;

/// A single asset's failure within an ingestion cycle. The two sources are
/// kept distinct so reports and logs can tell a dead upstream from a broken
/// store.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Provider fetch failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to persist observation: {0}")]
    Storage(#[from] StoreError),
}
