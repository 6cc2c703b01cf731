pub mod evaluation;
pub mod sweep;
