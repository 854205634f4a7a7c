//! Request body normalization.
//!
//! Callers may post either JSON or `application/x-www-form-urlencoded` bodies.
//! Both are turned into one [`serde_json::Value`] before reaching the tracking
//! services.

use axum::http::{HeaderMap, header::CONTENT_TYPE};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while decoding a request body.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("JSON inválido: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Wire encoding detected from the `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
}

impl BodyEncoding {
    /// `application/json` and any `+json` media type are JSON; everything
    /// else, including a missing header, is treated as form data.
    pub fn detect(headers: &HeaderMap) -> Self {
        let essence = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if essence == "application/json" || essence.ends_with("+json") {
            BodyEncoding::Json
        } else {
            BodyEncoding::Form
        }
    }
}

/// Decode `body` into a canonical JSON value according to its content type.
pub fn normalize_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, NormalizationError> {
    match BodyEncoding::detect(headers) {
        BodyEncoding::Json => Ok(serde_json::from_slice(body)?),
        BodyEncoding::Form => Ok(form_to_json(body)),
    }
}

/// Flatten form pairs into a JSON object of strings. The first value of a
/// repeated key wins.
pub fn form_to_json(body: &[u8]) -> Value {
    let mut object = Map::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        object
            .entry(key.into_owned())
            .or_insert_with(|| Value::String(value.into_owned()));
    }
    Value::Object(object)
}
