use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveTime;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer, normalize_path::NormalizePath, timeout::TimeoutLayer, trace::TraceLayer,
};

use super::{
    health_check, index_info, metrics_handler, request_validation_middleware, resource_router,
    security_headers_middleware,
};
use crate::models::{Meal, MenuOption, Order, ServiceError};
use crate::observability::{observability_middleware, Metrics};
use crate::repositories::InMemoryEntityStore;
use crate::services::{Clock, EntityService, OrderService, OrderingWindow};

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub meal_service: Arc<EntityService<Meal>>,
    pub menu_service: Arc<EntityService<MenuOption>>,
    pub order_service: Arc<OrderService>,
    pub metrics: Arc<Metrics>,
}

impl ApiState {
    /// Fresh in-memory stores for every resource, with orders gated by
    /// `closing` as read from `clock`
    pub fn in_memory(closing: NaiveTime, clock: Arc<dyn Clock>, metrics: Arc<Metrics>) -> Self {
        Self {
            meal_service: Arc::new(EntityService::<Meal>::new(Arc::new(
                InMemoryEntityStore::<Meal>::new(),
            ))),
            menu_service: Arc::new(EntityService::<MenuOption>::new(Arc::new(
                InMemoryEntityStore::<MenuOption>::new(),
            ))),
            order_service: Arc::new(OrderService::with_ordering_window(
                Arc::new(InMemoryEntityStore::<Order>::new()),
                OrderingWindow::new(closing, clock),
            )),
            metrics,
        }
    }
}

/// Router settings taken from the server configuration
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub api_prefix: String,
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            api_prefix: "/api/v2".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The application as served: the router behind trailing-slash trimming, so
/// `/api/v2/meals/` and `/api/v2/meals` reach the same route. Trimming has to
/// wrap the router because `Router::layer` only runs after route matching.
pub fn create_app(state: ApiState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(create_api_router(state, options))
}

/// Build the complete application router
pub fn create_api_router(state: ApiState, options: RouterOptions) -> Router {
    let api = Router::new()
        .merge(resource_router(state.meal_service, state.metrics.clone()))
        .merge(resource_router(state.menu_service, state.metrics.clone()))
        .merge(resource_router(state.order_service, state.metrics.clone()));

    // Nesting at the root is not allowed, so an empty prefix merges instead
    let prefix = options.api_prefix.trim_end_matches('/');
    let api = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    Router::new()
        .route("/", get(index_info))
        .route("/health/status", get(health_check))
        .route(
            "/metrics",
            get(metrics_handler).with_state(state.metrics.clone()),
        )
        .merge(api)
        .layer(middleware::from_fn(request_validation_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn_with_state(
            state.metrics,
            observability_middleware,
        ))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        service_error_to_response(self).into_response()
    }
}

/// Convert ServiceError to HTTP response.
///
/// Duplicate names and refusals past closing time are informational and
/// keep a 200 status.
pub fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    match err {
        ServiceError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": { field: message } })),
        ),
        ServiceError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": err.to_string() })),
        ),
        ServiceError::DuplicateName { .. } | ServiceError::PastClosing { .. } => (
            StatusCode::OK,
            Json(json!({ "message": err.to_string() })),
        ),
        ServiceError::MalformedBody { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": err.to_string() })),
        ),
    }
}
