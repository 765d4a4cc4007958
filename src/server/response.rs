//! Uniform JSON envelope for every editor-facing response.
//!
//! A found value is serialized with status 200; anything else is the empty
//! object `{}` with status 404. The editor treats both shapes as data, so
//! there is no error body.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const NOT_FOUND_BODY: &str = "{}";

/// Serialize `data` into a body and status.
pub fn encode<T: Serialize>(data: Option<&T>) -> (String, StatusCode) {
    let Some(data) = data else {
        return (NOT_FOUND_BODY.to_string(), StatusCode::NOT_FOUND);
    };

    match serde_json::to_string(data) {
        Ok(body) => (body, StatusCode::OK),
        Err(e) => {
            tracing::warn!("Failed to serialize response: {}", e);
            (NOT_FOUND_BODY.to_string(), StatusCode::NOT_FOUND)
        }
    }
}

/// Build the full HTTP response, with a `Cache-Control` hint when `max_age`
/// (in seconds) is given.
pub fn respond<T: Serialize>(data: Option<T>, max_age: Option<u64>) -> Response {
    let (body, status) = encode(data.as_ref());
    let mut response = (status, body).into_response();

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    if let Some(age) = max_age {
        if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={age}")) {
            headers.insert(CACHE_CONTROL, value);
        }
    }

    response
}
