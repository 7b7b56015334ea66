use axum::response::Json;
use serde_json::{json, Value};

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Plain-text greeting served at the root path
pub async fn index_info() -> &'static str {
    "Welcome to Fast Food Fast Version 2"
}
