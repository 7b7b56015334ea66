use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use serde_json::{json, Value};
use tracing::{error, warn};

const MAX_REQUEST_SIZE: u64 = 1024 * 1024; // 1MB

const ACCEPTED_BODY_TYPES: [&str; 2] = ["application/json", "application/x-www-form-urlencoded"];

/// Request validation middleware
pub async fn request_validation_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    validate_content_type(&request)?;
    validate_request_size(&request)?;

    Ok(next.run(request).await)
}

/// Bodies of POST/PUT requests must be JSON or a url-encoded form. A request
/// without a content type is let through and treated as carrying no fields.
fn validate_content_type(request: &Request<Body>) -> Result<(), (StatusCode, Json<Value>)> {
    let method = request.method();
    if method != Method::POST && method != Method::PUT {
        return Ok(());
    }

    let Some(content_type) = request.headers().get(header::CONTENT_TYPE) else {
        return Ok(());
    };

    let content_type_str = content_type.to_str().unwrap_or("").to_ascii_lowercase();
    if ACCEPTED_BODY_TYPES
        .iter()
        .any(|accepted| content_type_str.starts_with(accepted))
    {
        return Ok(());
    }

    warn!("Invalid content type: {}", content_type_str);
    Err((
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({
            "message": "Content-Type must be application/json or application/x-www-form-urlencoded",
        })),
    ))
}

fn validate_request_size(request: &Request<Body>) -> Result<(), (StatusCode, Json<Value>)> {
    let length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    match length {
        Some(length) if length > MAX_REQUEST_SIZE => {
            error!("Request too large: {} bytes", length);
            Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({
                    "message": format!(
                        "Request size {} bytes exceeds maximum of {} bytes",
                        length, MAX_REQUEST_SIZE
                    ),
                })),
            ))
        }
        _ => Ok(()),
    }
}

/// Security headers middleware
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
