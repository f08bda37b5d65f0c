use crate::error::StatsError;
use observation_store::ObservationStore;

/// Number of recent observations used for the deviation query when no
/// override is configured.
pub const DEFAULT_DEVIATION_WINDOW: usize = 100;

/// A stateless calculator over an asset's stored price history.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    store: ObservationStore,
}

impl StatsEngine {
    pub fn new(store: ObservationStore) -> Self {
        Self { store }
    }

    /// Standard deviation of the most recent `window` prices for `asset`,
    /// rounded to two decimal places.
    ///
    /// Fewer than `window` stored observations means all of them are used; a
    /// single-element window yields 0.0. No observations at all is
    /// `StatsError::NoData`.
    pub async fn price_deviation(&self, asset: &str, window: usize) -> Result<f64, StatsError> {
        let observations = self.store.recent(asset, window).await?;
        if observations.is_empty() {
            return Err(StatsError::NoData(asset.to_string()));
        }

        let prices: Vec<f64> = observations.iter().map(|o| o.price).collect();
        let mean = mean(&prices);
        let deviation = population_variance(&prices, mean).sqrt();

        tracing::debug!(
            asset,
            samples = prices.len(),
            deviation,
            "Computed price deviation"
        );

        Ok(round_to_two_places(deviation))
    }
}

/// Arithmetic mean. Callers guarantee a non-empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Average squared distance from the mean. The divisor is the sample count,
/// not count - 1.
fn population_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Presentation rounding; the computation above runs at full precision.
fn round_to_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
