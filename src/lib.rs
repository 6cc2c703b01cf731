//! # gilt-benchmark
//!
//! ICMA Rule 7.4 pricing benchmark selection for UK conventional gilts.
//!
//! Given the gilts in issue and the maturity date of a hypothetical new
//! issue, the engine picks the single gilt that market convention names as
//! its pricing benchmark, or reports that none can be identified.
//!
//! ## Architecture
//!
//! - **core**: Gilt records, ISINs, the appropriateness exclusion list
//! - **rules**: Eligibility classifier, date relations, the R7.4 cascade
//! - **engine**: Single-date evaluation and date-range validation sweep
//! - **simulation**: Synthetic gilt books for benches and testing
//! - **input** / **config**: JSON adapters at the edges

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod input;
pub mod rules;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::exclusion::ExclusionList;
    pub use crate::core::gilt::{Gilt, GiltSet};
    pub use crate::core::isin::Isin;
    pub use crate::engine::evaluation::{BenchmarkEngine, Evaluation, Predicates};
    pub use crate::engine::sweep::SweepReport;
    pub use crate::rules::cascade::{CascadeOutcome, Rule, Selection};
}
