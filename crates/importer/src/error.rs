use database::{config::ConfigError, error::ServiceError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Why a single CSV record could not be turned into a domain value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowParseError {
    #[error("invalid academic year '{0}'")]
    AcademicYear(String),
    #[error("invalid semester '{0}'")]
    Semester(String),
    #[error("invalid time '{0}', expected HH:MM or HH:MM:SS")]
    Time(String),
    #[error(transparent)]
    Schedule(#[from] models::schedule::ScheduleError),
}
