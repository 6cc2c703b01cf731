//! Eligibility classifier.
//!
//! A gilt is an *appropriate benchmark* (AB) when it is both benchmark size
//! and not manually excluded. Only ABs take part in the date rules and the
//! selection cascade.

use crate::core::exclusion::ExclusionList;
use crate::core::gilt::Gilt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Minimum nominal outstanding (GBP millions) for a gilt to be benchmark size.
pub const BENCHMARK_SIZE_THRESHOLD: Decimal = dec!(10_000);

/// The two independent eligibility predicates of one gilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub is_size_benchmark: bool,
    pub is_appropriate: bool,
}

impl Eligibility {
    /// Both benchmark size and appropriate.
    pub fn is_benchmark_eligible(&self) -> bool {
        self.is_size_benchmark && self.is_appropriate
    }
}

/// Benchmark size: at least [`BENCHMARK_SIZE_THRESHOLD`] in issue.
/// A gilt with no reported amount is below threshold.
pub fn is_size_benchmark(gilt: &Gilt) -> bool {
    gilt.amount_in_issue()
        .is_some_and(|amount| amount >= BENCHMARK_SIZE_THRESHOLD)
}

/// Appropriate: not on the exclusion list.
pub fn is_appropriate(gilt: &Gilt, exclusions: &ExclusionList) -> bool {
    !exclusions.is_excluded(gilt.isin())
}

pub fn classify(gilt: &Gilt, exclusions: &ExclusionList) -> Eligibility {
    Eligibility {
        is_size_benchmark: is_size_benchmark(gilt),
        is_appropriate: is_appropriate(gilt, exclusions),
    }
}

/// Classify every gilt, preserving input order.
pub fn classify_all(gilts: &[Gilt], exclusions: &ExclusionList) -> Vec<Eligibility> {
    gilts.iter().map(|g| classify(g, exclusions)).collect()
}
