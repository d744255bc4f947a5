use models::{grade::GradeError, schedule::ScheduleError, term::TermError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Term(#[from] TermError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("a grade already exists for this student, course and term")]
    DuplicateGrade,
    #[error("schedule conflict: the room is already booked at that time")]
    ScheduleConflict,
}

impl ServiceError {
    /// Caller supplied data that failed validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Grade(_) | Self::Schedule(_) | Self::Term(_))
    }
}
