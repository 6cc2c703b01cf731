//! Temporal relation engine.
//!
//! For a target maturity date, works out how each appropriate benchmark's
//! redemption date relates to it: same year, same year and month, nearest
//! shorter overall, and nearest shorter / longer inside the target's
//! calendar year.
//!
//! Every relation is computed as a [`MatchSet`] (a count plus the matching
//! gilts) rather than a column of flags, so callers can branch on
//! "none / exactly one / several" explicitly. Gilts that are not benchmark
//! eligible, or that have no redemption date, never appear in any set.

use crate::core::gilt::Gilt;
use crate::rules::eligibility::Eligibility;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Positions (into the evaluated gilt slice) of the gilts matching one
/// relation, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    indices: Vec<usize>,
}

impl MatchSet {
    fn from_indices(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The single member, if there is exactly one.
    pub fn unique(&self) -> Option<usize> {
        match self.indices.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Redemption date falls in the target's calendar year.
pub fn same_year(gilt: &Gilt, target: NaiveDate) -> bool {
    gilt.redemption_date()
        .is_some_and(|date| date.year() == target.year())
}

/// Redemption date falls in the target's calendar year and month.
pub fn same_year_and_month(gilt: &Gilt, target: NaiveDate) -> bool {
    gilt.redemption_date()
        .is_some_and(|date| date.year() == target.year() && date.month() == target.month())
}

#[derive(Clone, Copy)]
enum Extreme {
    Latest,
    Earliest,
}

/// All candidates sharing the latest (or earliest) date. Ties are all kept.
fn extreme_dates(candidates: &[(usize, NaiveDate)], extreme: Extreme) -> MatchSet {
    let best = match extreme {
        Extreme::Latest => candidates.iter().map(|(_, d)| *d).max(),
        Extreme::Earliest => candidates.iter().map(|(_, d)| *d).min(),
    };
    match best {
        Some(best) => MatchSet::from_indices(
            candidates
                .iter()
                .filter(|(_, d)| *d == best)
                .map(|(i, _)| *i)
                .collect(),
        ),
        None => MatchSet::default(),
    }
}

/// Per-gilt view of the date relations, as exposed in the augmented output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFlags {
    pub same_year: bool,
    pub same_year_and_month: bool,
    pub is_unique_same_year: bool,
    pub is_nearest_shorter: bool,
    pub is_nearest_shorter_in_calendar_year: bool,
    pub is_nearest_longer_in_calendar_year: bool,
}

/// Every date relation of a gilt collection against one target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRelations {
    target: NaiveDate,
    same_year: MatchSet,
    same_year_and_month: MatchSet,
    nearest_shorter: MatchSet,
    nearest_shorter_in_year: MatchSet,
    nearest_longer_in_year: MatchSet,
}

impl DateRelations {
    /// Compute all relations for `target`.
    ///
    /// `eligibility` must be parallel to `gilts`; gilts without a matching
    /// entry are treated as ineligible.
    pub fn compute(gilts: &[Gilt], eligibility: &[Eligibility], target: NaiveDate) -> Self {
        let dated_abs: Vec<(usize, NaiveDate)> = gilts
            .iter()
            .zip(eligibility)
            .enumerate()
            .filter(|(_, (_, e))| e.is_benchmark_eligible())
            .filter_map(|(i, (g, _))| g.redemption_date().map(|d| (i, d)))
            .collect();

        let in_year: Vec<(usize, NaiveDate)> = dated_abs
            .iter()
            .copied()
            .filter(|(_, d)| d.year() == target.year())
            .collect();

        let same_year = MatchSet::from_indices(in_year.iter().map(|(i, _)| *i).collect());
        let same_year_and_month = MatchSet::from_indices(
            in_year
                .iter()
                .filter(|(_, d)| d.month() == target.month())
                .map(|(i, _)| *i)
                .collect(),
        );

        let shorter: Vec<_> = dated_abs.iter().copied().filter(|(_, d)| *d < target).collect();
        let shorter_in_year: Vec<_> = in_year.iter().copied().filter(|(_, d)| *d < target).collect();
        let longer_in_year: Vec<_> = in_year.iter().copied().filter(|(_, d)| *d > target).collect();

        Self {
            target,
            same_year,
            same_year_and_month,
            nearest_shorter: extreme_dates(&shorter, Extreme::Latest),
            nearest_shorter_in_year: extreme_dates(&shorter_in_year, Extreme::Latest),
            nearest_longer_in_year: extreme_dates(&longer_in_year, Extreme::Earliest),
        }
    }

    pub fn target(&self) -> NaiveDate {
        self.target
    }

    pub fn same_year(&self) -> &MatchSet {
        &self.same_year
    }

    pub fn same_year_and_month(&self) -> &MatchSet {
        &self.same_year_and_month
    }

    /// The only AB maturing in the target year, if exactly one does.
    pub fn unique_same_year(&self) -> Option<usize> {
        self.same_year.unique()
    }

    /// AB(s) with the latest redemption date strictly before the target,
    /// in any year.
    pub fn nearest_shorter(&self) -> &MatchSet {
        &self.nearest_shorter
    }

    pub fn nearest_shorter_in_calendar_year(&self) -> &MatchSet {
        &self.nearest_shorter_in_year
    }

    pub fn nearest_longer_in_calendar_year(&self) -> &MatchSet {
        &self.nearest_longer_in_year
    }

    /// Flags of the gilt at `index`.
    pub fn flags(&self, index: usize) -> DateFlags {
        DateFlags {
            same_year: self.same_year.contains(index),
            same_year_and_month: self.same_year_and_month.contains(index),
            is_unique_same_year: self.unique_same_year() == Some(index),
            is_nearest_shorter: self.nearest_shorter.contains(index),
            is_nearest_shorter_in_calendar_year: self.nearest_shorter_in_year.contains(index),
            is_nearest_longer_in_calendar_year: self.nearest_longer_in_year.contains(index),
        }
    }
}
