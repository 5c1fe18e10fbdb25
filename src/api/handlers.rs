//! HTTP API handlers.

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DebateMeBro API",
        description = "AI-Powered Structured Debates That Steelman Both Sides",
        version = "0.1.0"
    ),
    paths(health),
    components(schemas(HealthResponse))
)]
pub struct ApiDoc;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Serve the OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
