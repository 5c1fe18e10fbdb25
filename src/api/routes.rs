//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health, openapi};

/// Create the API router.
pub fn create_router() -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        // Schema
        .route("/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Cross-origin policy admitting every origin, method and header with
/// credentials.
///
/// A literal `*` cannot be combined with credentials, so the request's own
/// values are echoed back.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
