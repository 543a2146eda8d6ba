// Unified response system for consistent API responses
// Provides HandlerResponse struct and middleware for standardizing all responses

use axum::{
    body::Body,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE}, HeaderValue, Request, Response,
        response::Parts, StatusCode,
    },
    Json,
    middleware::Next,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{debug, error, info, Level};
use std::convert::Infallible;
use serde_json::{json, Map, Value};
use serde::{Serialize, Deserialize};
use crate::utils::utils::to_two_space_indented_json;

/// Standard JSON response format for all API endpoints.
/// Payload fields sit next to the metadata so clients read `report` or `error` directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub status: String,          // HTTP status text (e.g. "OK", "NOT_FOUND")
    pub code: u16,               // HTTP status code
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub date: String,            // ISO timestamp
}

/// Convenience struct for building responses in handlers
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status_code: StatusCode,
    pub data: Value,
}

impl HandlerResponse {
    /// Creates a new response with specified status code
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            data: Value::Null,
        }
    }

    /// Adds JSON data payload to the response
    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Shorthand for `{ "error": message }` with the given status
    pub fn error(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status_code).data(json!({ "error": message.into() }))
    }

    fn into_payload(self) -> Map<String, Value> {
        match self.data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => Map::from_iter([("data".to_string(), other)]),
        }
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response: Response<Body> = Json(&self.data).into_response();

        *response.status_mut() = self.status_code;

        // Store HandlerResponse in extensions for middleware processing
        response.extensions_mut().insert(self);
        response
    }
}

/// "Not Found" -> "NOT_FOUND"
fn format_status(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN STATUS")
        .to_uppercase()
        .replace(' ', "_")
}

/// Body for error responses that did not come from a handler (404, 405, 408, 413...)
fn default_error_payload(status: StatusCode) -> Map<String, Value> {
    let reason: &str = status.canonical_reason().unwrap_or("Unknown error");
    Map::from_iter([("error".to_string(), Value::String(reason.to_string()))])
}

/// Logs status at info; the body carries user-derived text, so it stays at debug
fn log_formatted_response(wrapped: &ResponseFormat) {
    info!(code = wrapped.code, status = %wrapped.status, "Final response");

    if tracing::enabled!(Level::DEBUG) {
        match to_two_space_indented_json(wrapped) {
            Ok(spaced_json) => debug!("\nFinal response:\n{}", spaced_json),
            Err(err) => error!("Failed to format response JSON: {:?}", err),
        }
    }
}

/// Builds the final response with JSON content type
fn build_final_response(mut parts: Parts, wrapped: &ResponseFormat) -> Response<Body> {
    let json_body: Vec<u8> = serde_json::to_vec(wrapped).unwrap_or_else(|_| b"{}".to_vec());

    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Response::from_parts(parts, Body::from(json_body))
}

/// Middleware that wraps handler responses and errors in the standard ResponseFormat.
/// Successful responses that did not come from a handler (static files) pass through.
pub async fn response_wrapper(
    req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, Infallible> {
    let mut response: Response<Body> = next.run(req).await;

    let handler_response: Option<HandlerResponse> = response.extensions_mut().remove::<HandlerResponse>();
    let status: StatusCode = response.status();

    let payload: Map<String, Value> = match handler_response {
        Some(r) => r.into_payload(),
        None if status.is_client_error() || status.is_server_error() => default_error_payload(status),
        None => return Ok(response),
    };

    let (parts, _) = response.into_parts();

    let wrapped: ResponseFormat = ResponseFormat {
        status: format_status(parts.status),
        code: parts.status.as_u16(),
        payload,
        date: Utc::now().to_rfc3339(),
    };

    log_formatted_response(&wrapped);

    Ok(build_final_response(parts, &wrapped))
}
