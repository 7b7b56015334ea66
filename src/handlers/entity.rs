use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{service_error_to_response, BodyFields};
use crate::models::{Entity, Record, ServiceError, ServiceResult};
use crate::observability::Metrics;
use crate::services::EntityService;

type ErrorResponse = (StatusCode, Json<Value>);

/// State for one resource's handlers
pub struct ResourceState<E: Entity> {
    pub service: Arc<EntityService<E>>,
    pub metrics: Arc<Metrics>,
}

impl<E: Entity> Clone for ResourceState<E> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Collection and item routes for one resource, relative to the API prefix
pub fn resource_router<E: Entity>(
    service: Arc<EntityService<E>>,
    metrics: Arc<Metrics>,
) -> Router {
    let collection = format!("/{}", E::RESOURCE);
    let item = format!("/{}/:id", E::RESOURCE);

    Router::new()
        .route(&collection, get(list_entities::<E>).post(create_entity::<E>))
        .route(
            &item,
            get(get_entity::<E>)
                .put(update_entity::<E>)
                .delete(delete_entity::<E>),
        )
        .with_state(ResourceState { service, metrics })
}

/// List every entry as an id-keyed object
#[instrument(skip(state), fields(resource = E::RESOURCE))]
pub async fn list_entities<E: Entity>(
    State(state): State<ResourceState<E>>,
) -> Json<BTreeMap<u64, E>> {
    let entries = state.service.list().await;
    state.metrics.record_entity_operation(E::RESOURCE, "list", "success");
    Json(entries)
}

#[instrument(skip(state, body), fields(resource = E::RESOURCE))]
pub async fn create_entity<E: Entity>(
    State(state): State<ResourceState<E>>,
    body: Result<BodyFields, ServiceError>,
) -> Result<(StatusCode, Json<Record<E>>), ErrorResponse> {
    let result = match body {
        Ok(BodyFields(fields)) => state.service.create(&fields).await,
        Err(err) => Err(err),
    };
    let record = finish(&state, "create", result).await?;

    info!("Created {} with ID: {}", E::LABEL, record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state), fields(resource = E::RESOURCE))]
pub async fn get_entity<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(id): Path<String>,
) -> Result<Json<Record<E>>, ErrorResponse> {
    let result = match parse_id::<E>(&id) {
        Ok(id) => state.service.get(id).await,
        Err(err) => Err(err),
    };
    let record = finish(&state, "get", result).await?;

    Ok(Json(record))
}

#[instrument(skip(state, body), fields(resource = E::RESOURCE))]
pub async fn update_entity<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(id): Path<String>,
    body: Result<BodyFields, ServiceError>,
) -> Result<Json<Record<E>>, ErrorResponse> {
    let result = match (parse_id::<E>(&id), body) {
        (Err(not_found), _) => Err(not_found),
        (Ok(_), Err(err)) => Err(err),
        (Ok(id), Ok(BodyFields(fields))) => state.service.update(id, &fields).await,
    };
    let record = finish(&state, "update", result).await?;

    info!("Updated {} with ID: {}", E::LABEL, record.id);
    Ok(Json(record))
}

#[instrument(skip(state), fields(resource = E::RESOURCE))]
pub async fn delete_entity<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    let result = match parse_id::<E>(&id) {
        Ok(id) => state.service.delete(id).await,
        Err(err) => Err(err),
    };
    let record = finish(&state, "delete", result).await?;

    info!("Deleted {} with ID: {}", E::LABEL, record.id);
    Ok(Json(json!({
        "message": format!("{} has been deleted", E::LABEL),
    })))
}

/// Ids are plain digit runs; anything else (signs included) can never exist
fn parse_id<E: Entity>(raw: &str) -> ServiceResult<u64> {
    let not_found = || ServiceError::NotFound { label: E::LABEL };
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse().map_err(|_| not_found())
}

/// Record the outcome of a store operation and map failures to responses
async fn finish<E: Entity, T>(
    state: &ResourceState<E>,
    operation: &str,
    result: ServiceResult<T>,
) -> Result<T, ErrorResponse> {
    match result {
        Ok(value) => {
            state
                .metrics
                .record_entity_operation(E::RESOURCE, operation, "success");
            state
                .metrics
                .set_store_entries(E::RESOURCE, state.service.len().await);
            Ok(value)
        }
        Err(err) => {
            warn!("Failed to {} {}: {}", operation, E::LABEL, err);
            state
                .metrics
                .record_entity_operation(E::RESOURCE, operation, err.outcome());
            Err(service_error_to_response(err))
        }
    }
}
