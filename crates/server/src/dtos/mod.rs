pub mod dashboard;
pub mod grade;
pub mod pagination;
pub mod schedule;
