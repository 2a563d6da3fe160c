//! API module
//!
//! Contains HTTP request handlers for the company endpoints and the router
//! that wires them together.

pub mod companies;
pub mod render;
pub mod utils;

use crate::state::AppState;
use axum::{
    http::{header, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health indicator
    pub status: String,
    /// Crate version
    pub version: String,
}

const INDEX_PAGE: &str = r#"
        <h2>Trucking Company API</h2>
        <p>This is a RESTful API for managing trucking company data.</p>
        <p>Available endpoints:</p>
        <ul>
            <li>GET /companies</li>
            <li>GET /companies/&lt;name&gt;</li>
            <li>POST /companies</li>
            <li>PUT /companies/&lt;name&gt;</li>
            <li>DELETE /companies/&lt;name&gt;</li>
            <li>GET /render?file=&lt;name&gt;.json</li>
        </ul>
        "#;

/// Build the application router
///
/// Request-id, tracing and CORS layers are added by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    with_error_handling(routes()).with_state(state)
}

fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/:name",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route("/render", get(render::render_companies))
        .fallback(not_found)
}

/// Generic JSON error bodies for rejections and panics of every route in `router`
fn with_error_handling(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    router
        .layer(middleware::map_response(json_error_body))
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// GET / - Human-readable endpoint summary
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /api/health - Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND)
}

/// Generic `{"error": ..}` body for a status code
pub fn error_response(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::NOT_FOUND => "Resource not found",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal server error",
        other => other.canonical_reason().unwrap_or("Request failed"),
    };
    (status, Json(json!({ "error": message }))).into_response()
}

/// Replace framework-generated error bodies (extractor rejections, 405s)
/// with the generic JSON error body
///
/// Responses that already carry JSON or HTML are left alone.
async fn json_error_body(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_plain = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(true, |content_type| content_type.starts_with("text/plain"));

    if is_plain {
        error_response(status)
    } else {
        response
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR)
}
