//! Liveness handlers.

use axum::Json;
use serde::Serialize;

/// Body of GET /ping
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub response: &'static str,
}

/// Liveness probe. Does not touch the database.
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { response: "pong" })
}
