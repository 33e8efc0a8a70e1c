//! Root-level service routes: index and health check (not under `/api`).

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// Service index payload.
#[derive(Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    /// Top-level resource paths.
    pub endpoints: Vec<&'static str>,
}

/// GET / -- describes the service and its resources.
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "API de Gestão de Atividades",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "/api/projetos",
            "/api/squads",
            "/api/atividades",
            "/api/auth",
            "/api/usuarios",
            "/health",
        ],
    })
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = atividades_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount the index and health routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
