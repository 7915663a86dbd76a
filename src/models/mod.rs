pub mod prompt;
pub mod reading;
