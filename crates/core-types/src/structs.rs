use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The normalized view of an asset's market metrics as reported "now" by the
/// upstream provider.
///
/// Serializes with camelCase field names, which is also the wire shape the
/// query API returns for a snapshot request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Current unit price in the configured reporting currency.
    pub price: f64,
    /// Market capitalization; context only, never used for statistics.
    pub market_cap: Option<f64>,
    /// 24h price change percentage; context only, never used for statistics.
    pub change_24h: Option<f64>,
}

/// One persisted price sample for one asset at one ingestion time.
///
/// Observations are immutable once written: the store supports append and
/// ordered read, never update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Provider-side asset identifier (e.g. "bitcoin"). Unique only in
    /// combination with `observed_at`.
    pub asset: String,
    pub price: f64,
    pub market_cap: Option<f64>,
    pub change_24h: Option<f64>,
    /// Ingestion time, not provider time. Set at write time.
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    /// Builds an observation from a provider snapshot, stamped with the
    /// given ingestion time.
    pub fn from_snapshot(
        asset: impl Into<String>,
        snapshot: &MarketSnapshot,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            asset: asset.into(),
            price: snapshot.price,
            market_cap: snapshot.market_cap,
            change_24h: snapshot.change_24h,
            observed_at,
        }
    }
}
