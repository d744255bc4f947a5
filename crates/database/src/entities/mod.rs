pub mod class_schedule;
pub mod course;
pub mod grade;
pub mod lecturer;
pub mod student;
