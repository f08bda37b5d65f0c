use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to reach the market-data provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The provider returned status {0}: {1}")]
    Status(u16, String),

    #[error("The provider returned no market data for asset '{0}'")]
    AssetNotFound(String),

    #[error("Failed to deserialize the provider response: {0}")]
    Deserialization(String),

    #[error("Invalid data from the provider: {0}")]
    InvalidData(String),
}
