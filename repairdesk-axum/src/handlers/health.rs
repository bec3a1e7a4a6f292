//! Health check handler.

use serde::Serialize;

use crate::response::ApiResponse;

/// Liveness report.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health_check() -> ApiResponse<Health> {
    ApiResponse::ok(Health {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
