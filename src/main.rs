use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use ingestion::{IngestionPipeline, Scheduler};
use market_client::{CoinGeckoClient, MarketDataClient};
use observation_store::ObservationStore;
use statistics::StatsEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

/// Samples market prices for a set of tracked assets on a fixed schedule and
/// serves price statistics over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ingestion scheduler and the query API in one process.
    Serve,
    /// Run exactly one ingestion cycle and print the per-asset report.
    Ingest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if one is present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = configuration::load_config()?;

    // Initialize the database connection and make sure the schema exists.
    let pool = observation_store::connect().await?;
    let store = ObservationStore::new(pool);
    store.init_schema().await?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve => serve(config, store).await,
        Commands::Ingest => ingest_once(config, store).await,
    }
}

/// The production mode: the scheduler ingests the tracked assets in the
/// background while the query API serves requests, sharing one store.
async fn serve(config: Config, store: ObservationStore) -> anyhow::Result<()> {
    let market_client: Arc<dyn MarketDataClient> = Arc::new(CoinGeckoClient::new(&config.provider));

    let pipeline = Arc::new(IngestionPipeline::new(
        market_client.clone(),
        store.clone(),
        &config.tracker,
    ));
    let scheduler = Scheduler::new(pipeline, &config.tracker);
    tokio::spawn(scheduler.run());

    let state = Arc::new(AppState {
        market_client,
        stats: StatsEngine::new(store),
        deviation_window: config.statistics.deviation_window,
    });

    let addr = SocketAddr::new(config.server.host, config.server.port);
    web_server::run_server(addr, state).await
}

/// Operational escape hatch: one manual cycle, reported on stdout. Useful
/// when a scheduled cycle failed and the data is wanted now rather than at
/// the next recurrence.
async fn ingest_once(config: Config, store: ObservationStore) -> anyhow::Result<()> {
    let market_client: Arc<dyn MarketDataClient> = Arc::new(CoinGeckoClient::new(&config.provider));
    let pipeline = IngestionPipeline::new(market_client, store, &config.tracker);

    let report = pipeline.run_cycle().await;

    let mut table = Table::new();
    table.set_header(vec!["Asset", "Outcome"]);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => table.add_row(vec![outcome.asset.clone(), "stored".to_string()]),
            Err(e) => table.add_row(vec![outcome.asset.clone(), e.to_string()]),
        };
    }
    println!("{table}");
    println!(
        "Cycle started {}: {} stored, {} failed",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.succeeded(),
        report.failed()
    );

    Ok(())
}
