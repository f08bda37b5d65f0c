use async_trait::async_trait;
use configuration::ProviderConfig;
use core_types::MarketSnapshot;
use reqwest::header::{HeaderMap, HeaderValue};

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ProviderError;
pub use responses::MarketEntry;

/// The generic, abstract interface to the upstream market-data source.
///
/// This trait is the contract the ingestion pipeline and the query API use,
/// allowing the underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches the current market metrics for a single asset.
    ///
    /// The asset identifier is opaque to this component; it is passed
    /// through to the upstream source unchanged. This call does not retry;
    /// retry policy belongs to the caller.
    async fn fetch_market_data(&self, asset_id: &str) -> Result<MarketSnapshot, ProviderError>;
}

/// A concrete implementation of the `MarketDataClient` for the CoinGecko API.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    vs_currency: String,
}

impl CoinGeckoClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            headers.insert(
                "x-cg-pro-api-key",
                HeaderValue::from_str(key).expect("Invalid provider API key"),
            );
        }

        Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()
                .expect("Failed to build reqwest client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
        }
    }
}

#[async_trait]
impl MarketDataClient for CoinGeckoClient {
    async fn fetch_market_data(&self, asset_id: &str) -> Result<MarketSnapshot, ProviderError> {
        let url = format!("{}/coins/markets", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", asset_id),
                ("vs_currency", self.vs_currency.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16(), text));
        }

        let entries: Vec<MarketEntry> = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Deserialization(e.to_string()))?;

        snapshot_from_entries(asset_id, entries)
    }
}

/// Normalizes the provider's market listing into the snapshot for `asset_id`.
///
/// The markets endpoint answers with an array; an array without an entry for
/// the requested asset is a provider error, as is an entry whose price is
/// absent or not a finite number.
fn snapshot_from_entries(
    asset_id: &str,
    entries: Vec<MarketEntry>,
) -> Result<MarketSnapshot, ProviderError> {
    let entry = entries
        .into_iter()
        .find(|e| e.id == asset_id)
        .ok_or_else(|| ProviderError::AssetNotFound(asset_id.to_string()))?;

    match entry.current_price {
        Some(price) if price.is_finite() => Ok(MarketSnapshot {
            price,
            market_cap: entry.market_cap,
            change_24h: entry.price_change_percentage_24h,
        }),
        other => Err(ProviderError::InvalidData(format!(
            "unusable price {:?} for asset '{}'",
            other, asset_id
        ))),
    }
}
