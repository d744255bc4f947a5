use crate::{
    dtos::{
        pagination::{PaginationMeta, normalize},
        schedule::{
            ConflictCheckRequest, ConflictCheckResponse, PaginatedSchedulesResponse,
            ScheduleQueryParams, ScheduleRequest, ScheduleResponse,
        },
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::schedule::ScheduleService;
use uuid::Uuid;

/// Get paginated list of class schedules, Monday first
#[utoipa::path(
    get,
    path = "/schedules",
    params(ScheduleQueryParams),
    responses(
        (status = 200, description = "List of schedules retrieved successfully", body = PaginatedSchedulesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn get_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQueryParams>,
) -> Result<Json<PaginatedSchedulesResponse>, ApiError> {
    let (page, per_page) = normalize(params.page, params.per_page);

    let (schedules, total_items) =
        ScheduleService::list_schedules(&state.db, params.filter(), page, per_page).await?;

    Ok(Json(PaginatedSchedulesResponse {
        schedules: schedules.into_iter().map(ScheduleResponse::from).collect(),
        pagination: PaginationMeta::new(page, per_page, total_items),
    }))
}

/// Book a room for a class meeting
#[utoipa::path(
    post,
    path = "/schedules",
    request_body = ScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleResponse),
        (status = 409, description = "The room is already booked at that time"),
        (status = 422, description = "Invalid time interval or room")
    ),
    tag = "Schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    let model = ScheduleService::create_schedule(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(model.into())))
}

/// Check whether a booking would clash with the stored schedule
#[utoipa::path(
    post,
    path = "/schedules/check",
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict check result", body = ConflictCheckResponse),
        (status = 422, description = "Invalid time interval or room")
    ),
    tag = "Schedules"
)]
pub async fn check_schedule_conflict(
    State(state): State<AppState>,
    Json(request): Json<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, ApiError> {
    let slot = request.to_slot()?;
    let conflict = ScheduleService::check_conflict(&state.db, &slot, request.exclude_id).await?;

    Ok(Json(ConflictCheckResponse { conflict }))
}

/// Get a specific schedule by ID
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleResponse),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn get_schedule_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    match ScheduleService::get_schedule(&state.db, id).await? {
        Some(model) => Ok(Json(model.into())),
        None => Err(ApiError::NotFound("schedule")),
    }
}

/// Move or edit a class meeting
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = ScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleResponse),
        (status = 404, description = "Schedule not found"),
        (status = 409, description = "The room is already booked at that time"),
        (status = 422, description = "Invalid time interval or room")
    ),
    tag = "Schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let model = ScheduleService::update_schedule(&state.db, id, request.into()).await?;
    Ok(Json(model.into()))
}

/// Delete a class meeting
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ScheduleService::delete_schedule(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
