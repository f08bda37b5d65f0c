use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use market_client::ProviderError;
use serde_json::json;
use statistics::StatsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Provider failures and empty histories surface to the caller as the
/// "no data" response; anything else becomes a generic server error. The
/// underlying detail is logged server-side, never leaked to the caller.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Provider(provider_err) => {
                tracing::warn!(error = %provider_err, "Provider lookup failed.");
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "No data found" })),
                )
                    .into_response()
            }
            AppError::Stats(StatsError::NoData(asset)) => {
                tracing::info!(asset = %asset, "No stored observations for deviation query.");
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "No data found" })),
                )
                    .into_response()
            }
            AppError::Stats(StatsError::Store(store_err)) => {
                tracing::error!(error = ?store_err, "Storage error while serving query.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal storage error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
