use crate::{dtos::dashboard::DashboardResponse, error::ApiError, state::AppState};
use axum::{Json, extract::State};
use database::services::dashboard::DashboardService;

/// Get entity counts and the letter-grade distribution
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let summary = DashboardService::summary(&state.db).await?;
    Ok(Json(summary.into()))
}
