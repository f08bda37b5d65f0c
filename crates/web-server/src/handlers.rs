use crate::{error::AppError, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use core_types::MarketSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query string shared by both read operations: `?coin=<provider id>`.
#[derive(Debug, Deserialize)]
pub struct CoinQuery {
    pub coin: String,
}

#[derive(Debug, Serialize)]
pub struct DeviationResponse {
    pub deviation: f64,
}

/// # GET /stats?coin=<id>
///
/// Live snapshot straight from the provider; the store is bypassed so the
/// answer is always current. Works for any asset the provider knows, tracked
/// or not.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoinQuery>,
) -> Result<Json<MarketSnapshot>, AppError> {
    let snapshot = state.market_client.fetch_market_data(&query.coin).await?;
    Ok(Json(snapshot))
}

/// # GET /deviation?coin=<id>
///
/// Standard deviation over the asset's most recent stored prices.
pub async fn get_deviation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoinQuery>,
) -> Result<Json<DeviationResponse>, AppError> {
    tracing::info!(coin = %query.coin, "Calculating deviation");

    let deviation = state
        .stats
        .price_deviation(&query.coin, state.deviation_window)
        .await?;

    Ok(Json(DeviationResponse { deviation }))
}
