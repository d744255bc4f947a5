pub mod grade;
pub mod schedule;
pub mod term;

#[cfg(feature = "database")]
mod db_value;
