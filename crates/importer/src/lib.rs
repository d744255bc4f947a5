pub mod error;
pub mod rows;
pub mod util;
