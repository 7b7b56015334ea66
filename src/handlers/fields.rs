use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::models::{RequestFields, ServiceError};

/// Request body fields accepted from either a JSON object or a url-encoded
/// form. Any other body, including an empty one, yields no fields.
#[derive(Debug, Clone, Default)]
pub struct BodyFields(pub RequestFields);

#[async_trait]
impl<S> FromRequest<S> for BodyFields
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| ServiceError::MalformedBody {
                    message: rejection.body_text(),
                })?;
            return Ok(Self(fields));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| ServiceError::MalformedBody {
                    message: rejection.body_text(),
                })?;
            let fields = form
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            return Ok(Self(fields));
        }

        Ok(Self::default())
    }
}
