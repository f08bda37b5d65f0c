use market_client::{CoinGeckoClient, MarketDataClient};
use observation_store::ObservationStore;
use statistics::StatsEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

// This main function is the entry point when running `cargo run -p web-server`:
// the query API alone, without the ingestion scheduler. The full process is
// the root `coinwatch serve` binary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = configuration::load_config()?;

    let pool = observation_store::connect().await?;
    let store = ObservationStore::new(pool);
    store.init_schema().await?;

    let market_client: Arc<dyn MarketDataClient> = Arc::new(CoinGeckoClient::new(&config.provider));
    let state = Arc::new(AppState {
        market_client,
        stats: StatsEngine::new(store),
        deviation_window: config.statistics.deviation_window,
    });

    let addr = SocketAddr::new(config.server.host, config.server.port);
    web_server::run_server(addr, state).await
}
