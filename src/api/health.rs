//! Static pages and health check

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Home page", body = String, content_type = "text/plain"))
)]
pub async fn home() -> &'static str {
    "Homepage"
}

#[utoipa::path(
    get,
    path = "/info",
    tag = "health",
    responses((status = 200, description = "Info page", body = String, content_type = "text/plain"))
)]
pub async fn info() -> &'static str {
    "Info page"
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
