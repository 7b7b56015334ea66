use axum::{extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::error;

use crate::observability::Metrics;

/// Prometheus text exposition of every registered metric
pub async fn metrics_handler(State(metrics): State<Arc<Metrics>>) -> Result<String, StatusCode> {
    metrics.encode().map_err(|err| {
        error!("Failed to encode metrics: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
