//! API utility functions
//!
//! Contains helper functions used by API handlers for request body
//! validation and name checks.

use crate::error::AppError;
use crate::state::normalize_name;
use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

/// Whether the request declares a JSON body
///
/// Accepts `application/json` and `application/*+json`, ignoring parameters
/// such as `charset`.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parse a request body as a JSON object
///
/// # Arguments
/// * `headers` - Request headers (content type is checked)
/// * `body` - Raw request body
///
/// # Returns
/// * `Ok(Map)` - The body's top-level object
/// * `Err(AppError::Validation)` - Body is not declared as JSON, does not
///   parse, or is not an object
pub fn parse_json_object(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Map<String, Value>, AppError> {
    if !is_json_content_type(headers) {
        return Err(AppError::Validation("Request body must be JSON".to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|_| AppError::Validation("Malformed JSON".to_string()))?;

    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Check that a `Company` value in an update body names the same company as the URL
pub fn validate_name_matches(value: &Value, path_name: &str) -> Result<(), AppError> {
    let matches = value
        .as_str()
        .is_some_and(|name| normalize_name(name) == normalize_name(path_name));

    if matches {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Company name in payload does not match URL".to_string(),
        ))
    }
}
