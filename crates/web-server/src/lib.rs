use axum::{routing::get, Router};
use market_client::MarketDataClient;
use statistics::StatsEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

pub use error::AppError;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub market_client: Arc<dyn MarketDataClient>,
    pub stats: StatsEngine,
    /// Window size for the deviation query, fixed at process start.
    pub deviation_window: usize,
}

/// Builds the application router with all routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    // The presentation layer is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/stats", get(handlers::get_stats))
        .route("/deviation", get(handlers::get_deviation))
        .with_state(state)
        .layer(cors)
        // Logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = app(state);

    tracing::info!("Query API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
