use crate::state::AppState;
use axum::{Json, extract::State};
use log::warn;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether the database answered a ping
    pub database: bool,
}

/// Liveness check; always 200 while the process is serving
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database ping failed: {e}");
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
