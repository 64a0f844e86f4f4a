//! # Health Endpoint
//!
//! Simple liveness probe; public, no authentication required.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Simple health check response for liveness probes.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check: GET /health
pub async fn health_check() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
