pub mod cascade;
pub mod eligibility;
pub mod temporal;
