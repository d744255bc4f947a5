use crate::{
    dtos::{
        grade::{CreateGradeRequest, GradeQueryParams, GradeResponse, PaginatedGradesResponse},
        pagination::{PaginationMeta, normalize},
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::grade::GradeService;
use models::grade::{FinalGrade, ScoreComponents};
use uuid::Uuid;

/// Compute a final grade without saving it
#[utoipa::path(
    post,
    path = "/grades/preview",
    request_body = ScoreComponents,
    responses(
        (status = 200, description = "Weighted score and letter grade", body = FinalGrade),
        (status = 422, description = "A score is outside 0-100")
    ),
    tag = "Grades"
)]
pub async fn preview_grade(Json(scores): Json<ScoreComponents>) -> Result<Json<FinalGrade>, ApiError> {
    scores.validate()?;
    Ok(Json(scores.final_grade()))
}

/// Get paginated list of grades
#[utoipa::path(
    get,
    path = "/grades",
    params(GradeQueryParams),
    responses(
        (status = 200, description = "List of grades retrieved successfully", body = PaginatedGradesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn get_grades(
    State(state): State<AppState>,
    Query(params): Query<GradeQueryParams>,
) -> Result<Json<PaginatedGradesResponse>, ApiError> {
    let (page, per_page) = normalize(params.page, params.per_page);

    let (grades, total_items) =
        GradeService::list_grades(&state.db, params.filter(), page, per_page).await?;

    Ok(Json(PaginatedGradesResponse {
        grades: grades.into_iter().map(GradeResponse::from).collect(),
        pagination: PaginationMeta::new(page, per_page, total_items),
    }))
}

/// Record the component scores of a student for a course and term
#[utoipa::path(
    post,
    path = "/grades",
    request_body = CreateGradeRequest,
    responses(
        (status = 201, description = "Grade recorded", body = GradeResponse),
        (status = 409, description = "A grade already exists for this student, course and term"),
        (status = 422, description = "A score is outside 0-100")
    ),
    tag = "Grades"
)]
pub async fn create_grade(
    State(state): State<AppState>,
    Json(request): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    let model = GradeService::create_grade(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(model.into())))
}

/// Get a specific grade by ID
#[utoipa::path(
    get,
    path = "/grades/{id}",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Grade found", body = GradeResponse),
        (status = 404, description = "Grade not found")
    ),
    tag = "Grades"
)]
pub async fn get_grade_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeResponse>, ApiError> {
    match GradeService::get_grade(&state.db, id).await? {
        Some(model) => Ok(Json(model.into())),
        None => Err(ApiError::NotFound("grade")),
    }
}

/// Replace the component scores of a grade; the final grade is recomputed
#[utoipa::path(
    put,
    path = "/grades/{id}",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    request_body = ScoreComponents,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 404, description = "Grade not found"),
        (status = 422, description = "A score is outside 0-100")
    ),
    tag = "Grades"
)]
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(scores): Json<ScoreComponents>,
) -> Result<Json<GradeResponse>, ApiError> {
    let model = GradeService::update_grade(&state.db, id, scores).await?;
    Ok(Json(model.into()))
}

/// Delete a grade
#[utoipa::path(
    delete,
    path = "/grades/{id}",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 404, description = "Grade not found")
    ),
    tag = "Grades"
)]
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    GradeService::delete_grade(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
