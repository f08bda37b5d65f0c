use serde::Deserialize;

/// A single entry from `GET /coins/markets`.
///
/// The endpoint reports many more fields; we only deserialize the ones this
/// system consumes. All metrics are nullable upstream (delisted or illiquid
/// assets), so they arrive as `Option`s and are validated during
/// normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketEntry {
    pub id: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}
