//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Readiness probe (round-trip to the backing store)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting
/// connections without touching the backing store.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Readiness probe.
///
/// Issues a cheap query against the backing store. Returns 200 with the
/// current customer count if the store answers, 503 otherwise.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.customer_repo.find_all().await {
        Ok(customers) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "customers": customers.len(),
            })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "unavailable",
                "error": err.to_string(),
            })),
        )
            .into_response(),
    }
}
