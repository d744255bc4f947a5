use crate::{
    dtos::{dashboard, grade as grade_dto, pagination, schedule as schedule_dto},
    routes::{dashboard as dashboard_routes, grade, health, root, schedule},
};
use models::{
    grade::{FinalGrade, LetterGrade, ScoreComponents},
    schedule::{DayOfWeek, TimeRange},
    term::Semester,
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        grade::preview_grade,
        grade::get_grades,
        grade::create_grade,
        grade::get_grade_by_id,
        grade::update_grade,
        grade::delete_grade,
        schedule::get_schedules,
        schedule::create_schedule,
        schedule::check_schedule_conflict,
        schedule::get_schedule_by_id,
        schedule::update_schedule,
        schedule::delete_schedule,
        dashboard_routes::get_dashboard
    ),
    components(schemas(
        ScoreComponents,
        FinalGrade,
        LetterGrade,
        Semester,
        DayOfWeek,
        TimeRange,
        pagination::PaginationMeta,
        grade_dto::CreateGradeRequest,
        grade_dto::GradeResponse,
        grade_dto::PaginatedGradesResponse,
        schedule_dto::ScheduleRequest,
        schedule_dto::ConflictCheckRequest,
        schedule_dto::ConflictCheckResponse,
        schedule_dto::ScheduleResponse,
        schedule_dto::PaginatedSchedulesResponse,
        dashboard::DashboardResponse,
        dashboard::LetterCountResponse,
        health::HealthResponse
    )),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Grades", description = "Grade calculation and records"),
        (name = "Schedules", description = "Class schedules and room conflict detection"),
        (name = "Dashboard", description = "Administration summary"),
    ),
    info(
        title = "Academic Administration API",
        version = "1.0.0",
        description = "Grades and class schedules for a university",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
