//! Liveness endpoint for the ledger service.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report naming this service.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `fintrack`.
    pub service: &'static str,
    /// `healthy` while the ledger database answers, `degraded` otherwise.
    pub status: &'static str,
    /// `up` or `down`.
    pub database: &'static str,
    /// Crate version.
    pub version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = state.db.ping().await.is_ok();
    if !database_up {
        tracing::warn!("health check could not reach the ledger database");
    }
    Json(HealthResponse {
        service: "fintrack",
        status: if database_up { "healthy" } else { "degraded" },
        database: if database_up { "up" } else { "down" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the unauthenticated health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
