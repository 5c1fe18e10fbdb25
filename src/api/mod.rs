//! HTTP API module for the liveness check and schema endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::ApiDoc;
pub use routes::{cors_layer, create_router};
