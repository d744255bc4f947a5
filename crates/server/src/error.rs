use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use models::{grade::GradeError, schedule::ScheduleError};
use serde_json::json;
use thiserror::Error;

/// Error returned by every handler, rendered as `{ "error": "..." }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<GradeError> for ApiError {
    fn from(err: GradeError) -> Self {
        Self::Service(err.into())
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        Self::Service(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::DuplicateGrade | ServiceError::ScheduleConflict) => {
                StatusCode::CONFLICT
            }
            Self::Service(e) if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Database details stay in the log
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use models::{grade::ScoreComponent, term::TermError};
    use sea_orm::DbErr;

    #[test]
    fn test_status_mapping() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        let cases = [
            (ApiError::NotFound("grade"), StatusCode::NOT_FOUND),
            (
                ApiError::Service(ServiceError::NotFound("schedule")),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Service(ServiceError::ScheduleConflict),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Service(ServiceError::DuplicateGrade),
                StatusCode::CONFLICT,
            ),
            (
                GradeError::InvalidScore {
                    component: ScoreComponent::Midterm,
                    value: 101.0,
                }
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ScheduleError::InvalidInterval {
                    start: time,
                    end: time,
                }
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Service(ServiceError::Term(TermError::YearOutOfRange(i16::MAX))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Service(ServiceError::Database(DbErr::Custom("boom".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::Service(ServiceError::ScheduleConflict).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
