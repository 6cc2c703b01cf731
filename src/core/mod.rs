pub mod exclusion;
pub mod gilt;
pub mod isin;
