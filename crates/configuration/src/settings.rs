use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub statistics: StatisticsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the upstream market-data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider's REST API (e.g. "https://api.coingecko.com/api/v3").
    pub base_url: String,
    /// The reporting currency for all price fields.
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    /// Optional Pro API key, sent as the `x-cg-pro-api-key` header when present.
    /// Supplied via the COINWATCH__PROVIDER__API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// The tracked asset set and the recurrence of its scheduled ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Provider-side ids of the assets ingested on every cycle.
    pub assets: Vec<String>,
    /// Seconds between scheduled ingestion cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

/// Parameters for the windowed-statistics query path.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsConfig {
    /// Maximum number of recent observations used for the deviation query.
    #[serde(default = "default_deviation_window")]
    pub deviation_window: usize,
}

/// Bind address for the query API.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Rejects configurations that would make the scheduler or the query
    /// path degenerate at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.base_url must not be empty".to_string(),
            ));
        }
        if self.tracker.assets.is_empty() {
            return Err(ConfigError::ValidationError(
                "tracker.assets must list at least one asset".to_string(),
            ));
        }
        if self.tracker.assets.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "tracker.assets must not contain empty identifiers".to_string(),
            ));
        }
        if self.tracker.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "tracker.interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.statistics.deviation_window == 0 {
            return Err(ConfigError::ValidationError(
                "statistics.deviation_window must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            deviation_window: default_deviation_window(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

// Two hours.
fn default_interval_secs() -> u64 {
    7200
}

fn default_deviation_window() -> usize {
    100
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}
