pub mod dashboard;
pub mod grade;
pub mod health;
pub mod root;
pub mod schedule;

use crate::{doc::ApiDoc, state::AppState};
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router with docs and response compression
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/grades/preview", post(grade::preview_grade))
        .route("/grades", get(grade::get_grades).post(grade::create_grade))
        .route(
            "/grades/{id}",
            get(grade::get_grade_by_id)
                .put(grade::update_grade)
                .delete(grade::delete_grade),
        )
        .route(
            "/schedules",
            get(schedule::get_schedules).post(schedule::create_schedule),
        )
        .route("/schedules/check", post(schedule::check_schedule_conflict))
        .route(
            "/schedules/{id}",
            get(schedule::get_schedule_by_id)
                .put(schedule::update_schedule)
                .delete(schedule::delete_schedule),
        )
        .route("/dashboard", get(dashboard::get_dashboard))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
