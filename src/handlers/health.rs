use axum::{response::Json, routing::get, Router};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app_state::AppState;

pub async fn health_check() -> Json<serde_json::Value> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "service": "product-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
