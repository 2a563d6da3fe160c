//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::services::render::{escape_html, RenderService};
use crate::state::StoreError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur while serving the company API are represented by
/// this enum. Each variant implements automatic conversion to HTTP responses
/// via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// No company matches the requested name
    #[error("Company '{0}' not found")]
    CompanyNotFound(String),

    /// A company with the same (case-insensitive) name already exists
    #[error("Company '{0}' already exists")]
    CompanyExists(String),

    /// The create payload lacks one or more required fields (sorted)
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The request body or its contents failed validation
    #[error("{0}")]
    Validation(String),

    /// Reading or writing the backing file failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::CompanyNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CompanyExists(_) => StatusCode::CONFLICT,
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Table rendering errors
///
/// Rendered as small HTML error pages rather than JSON bodies.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No `file` query parameter was supplied
    #[error("No file parameter provided")]
    MissingFile,

    /// The file name is not a plain `.json` name inside the render directory
    #[error("Invalid filename")]
    InvalidFilename,

    /// The named document does not exist
    #[error("File \"{0}\" not found")]
    FileNotFound(String),

    /// The document is not valid JSON or not a table document
    #[error("Invalid JSON file")]
    InvalidJson(#[source] serde_json::Error),

    /// Reading the document failed for another reason
    #[error("{0}")]
    Io(String),
}

impl RenderError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            RenderError::MissingFile => StatusCode::BAD_REQUEST,
            RenderError::InvalidFilename => StatusCode::BAD_REQUEST,
            RenderError::FileNotFound(_) => StatusCode::NOT_FOUND,
            RenderError::InvalidJson(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RenderError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Table rendering failed");
        } else {
            tracing::debug!(error = %self, "Table rendering rejected");
        }

        let message = format!("Error: {}", escape_html(&self.to_string()));
        (status, Html(RenderService::message_page(&message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::CompanyNotFound("X".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CompanyExists("X".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = AppError::MissingFields(vec!["Hubs".to_string(), "Logo".to_string()]);
        assert_eq!(err.to_string(), "Missing required fields: Hubs, Logo");
    }

    #[test]
    fn test_render_error_pages() {
        let err = RenderError::FileNotFound("<x>.json".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "File \"<x>.json\" not found");

        let response = RenderError::InvalidFilename.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::CompanyNotFound("Acme".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
