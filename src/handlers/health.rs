use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. No remote call here: the spreadsheet is reached per
/// request, not held open, so there is nothing meaningful to ping.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "pairsheet-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
