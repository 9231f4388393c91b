//! Liveness and readiness probes for the Quill service.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

const SERVICE_NAME: &str = "quill";

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub version: String,
}

/// State of a dependency checked by `/ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Up,
    Down,
}

/// Body of `GET /ready`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `unavailable`.
    pub status: String,
    pub database: DependencyStatus,
}

impl ReadinessResponse {
    fn from_database(database: DependencyStatus) -> (StatusCode, Self) {
        match database {
            DependencyStatus::Up => (
                StatusCode::OK,
                Self {
                    status: "ready".to_string(),
                    database,
                },
            ),
            DependencyStatus::Down => (
                StatusCode::SERVICE_UNAVAILABLE,
                Self {
                    status: "unavailable".to_string(),
                    database,
                },
            ),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Reports the service name and build version. Does not touch the database.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME.to_string(),
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Pings the database through the shared storage handle.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.storage.health_check().await {
        Ok(()) => DependencyStatus::Up,
        Err(e) => {
            warn!(error = %e, "Database ping failed, reporting not ready");
            DependencyStatus::Down
        }
    };

    let (status, body) = ReadinessResponse::from_database(database);
    (status, Json(body))
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive")
    )
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
