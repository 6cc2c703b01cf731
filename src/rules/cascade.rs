//! ICMA Rule 7.4 selection cascade.
//!
//! Given the date relations of the appropriate benchmarks (ABs) against a
//! new issue's maturity, picks at most one gilt:
//!
//! 1. **R7.4(a)** exactly one AB matures in the same calendar year: take it.
//! 2. **R7.4(b)** none mature in that year: take the nearest shorter AB.
//! 3. **R7.4(c)** several mature in that year, first rule yielding exactly one:
//!    1. an AB maturing in the same month,
//!    2. the nearest shorter AB in the calendar year,
//!    3. the nearest longer AB in the calendar year.
//!
//! When no rule yields exactly one gilt, nothing is selected. That is a
//! normal business outcome, reported through [`CascadeOutcome`].

use crate::core::gilt::Gilt;
use crate::core::isin::Isin;
use crate::rules::temporal::{DateRelations, MatchSet};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rule of the cascade that produced (or failed to produce) a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rule {
    /// R7.4(a): the only AB maturing in the same calendar year.
    SoleInYear,
    /// R7.4(b): no AB in the year, nearest shorter AB.
    NearestShorter,
    /// R7.4(c)(i): AB maturing in the same year and month.
    SameMonth,
    /// R7.4(c)(ii): nearest shorter AB in the calendar year.
    NearestShorterInYear,
    /// R7.4(c)(iii): nearest longer AB in the calendar year.
    NearestLongerInYear,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::SoleInYear,
        Rule::NearestShorter,
        Rule::SameMonth,
        Rule::NearestShorterInYear,
        Rule::NearestLongerInYear,
    ];

    /// Rulebook reference, e.g. `R7.4(c)(ii)`.
    pub fn code(&self) -> &'static str {
        match self {
            Rule::SoleInYear => "R7.4(a)",
            Rule::NearestShorter => "R7.4(b)",
            Rule::SameMonth => "R7.4(c)(i)",
            Rule::NearestShorterInYear => "R7.4(c)(ii)",
            Rule::NearestLongerInYear => "R7.4(c)(iii)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::SoleInYear => "only AB maturing in the same calendar year",
            Rule::NearestShorter => "no AB in the calendar year, nearest shorter AB",
            Rule::SameMonth => "AB maturing in the same month",
            Rule::NearestShorterInYear => "nearest shorter AB in the calendar year",
            Rule::NearestLongerInYear => "nearest longer AB in the calendar year",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The gilt chosen as pricing benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Position of the gilt in the evaluated collection.
    pub index: usize,
    pub isin: Isin,
    pub instrument_name: String,
    pub redemption_date: NaiveDate,
    pub rule: Rule,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) via {}",
            self.isin, self.instrument_name, self.redemption_date, self.rule
        )
    }
}

/// Result of running the cascade once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CascadeOutcome {
    /// Exactly one benchmark identified.
    Selected(Selection),
    /// R7.4(b) applied but no AB matures before the target.
    NoCandidate { rule: Rule },
    /// R7.4(b) applied but several ABs share the nearest shorter date.
    Ambiguous { rule: Rule, candidates: Vec<Isin> },
    /// R7.4(c) sub-rules all failed to produce exactly one gilt.
    /// `candidates` are the ABs maturing in the target year.
    RulesExhausted { candidates: Vec<Isin> },
}

impl CascadeOutcome {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            CascadeOutcome::Selected(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn into_selection(self) -> Option<Selection> {
        match self {
            CascadeOutcome::Selected(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection().map(|s| s.index)
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, CascadeOutcome::Selected(_))
    }
}

impl fmt::Display for CascadeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CascadeOutcome::Selected(selection) => write!(f, "benchmark: {}", selection),
            CascadeOutcome::NoCandidate { rule } => {
                write!(f, "no benchmark identified: {} has no candidate", rule)
            }
            CascadeOutcome::Ambiguous { rule, candidates } => write!(
                f,
                "no benchmark identified: {} tied between {}",
                rule,
                join_isins(candidates)
            ),
            CascadeOutcome::RulesExhausted { candidates } => write!(
                f,
                "no benchmark identified: R7.4(c) rules exhausted over {}",
                join_isins(candidates)
            ),
        }
    }
}

fn join_isins(isins: &[Isin]) -> String {
    isins
        .iter()
        .map(Isin::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn isins_of(gilts: &[Gilt], matches: &MatchSet) -> Vec<Isin> {
    matches
        .indices()
        .iter()
        .filter_map(|&i| gilts.get(i))
        .map(|g| g.isin().clone())
        .collect()
}

fn select(gilts: &[Gilt], index: usize, rule: Rule) -> Option<Selection> {
    let gilt = gilts.get(index)?;
    Some(Selection {
        index,
        isin: gilt.isin().clone(),
        instrument_name: gilt.instrument_name().to_string(),
        redemption_date: gilt.redemption_date()?,
        rule,
    })
}

/// Run the cascade over `gilts` using relations computed for the same slice.
pub fn run_cascade(gilts: &[Gilt], relations: &DateRelations) -> CascadeOutcome {
    let target = relations.target();
    let same_year = relations.same_year();
    debug!(
        "{}: {} AB(s) mature in calendar year of new issue",
        target,
        same_year.count()
    );

    let outcome = match same_year.count() {
        1 => {
            debug!("{}: {} satisfied ({})", target, Rule::SoleInYear, Rule::SoleInYear.description());
            resolve_unique(gilts, same_year, Rule::SoleInYear)
        }
        0 => {
            debug!("{}: {} applies ({})", target, Rule::NearestShorter, Rule::NearestShorter.description());
            let shorter = relations.nearest_shorter();
            match shorter.count() {
                0 => CascadeOutcome::NoCandidate {
                    rule: Rule::NearestShorter,
                },
                1 => resolve_unique(gilts, shorter, Rule::NearestShorter),
                _ => CascadeOutcome::Ambiguous {
                    rule: Rule::NearestShorter,
                    candidates: isins_of(gilts, shorter),
                },
            }
        }
        _ => {
            let sub_rules = [
                (Rule::SameMonth, relations.same_year_and_month()),
                (Rule::NearestShorterInYear, relations.nearest_shorter_in_calendar_year()),
                (Rule::NearestLongerInYear, relations.nearest_longer_in_calendar_year()),
            ];
            sub_rules
                .iter()
                .find(|(rule, matches)| {
                    debug!("{}: {} yields {} candidate(s)", target, rule, matches.count());
                    matches.count() == 1
                })
                .map(|(rule, matches)| resolve_unique(gilts, matches, *rule))
                .unwrap_or_else(|| CascadeOutcome::RulesExhausted {
                    candidates: isins_of(gilts, same_year),
                })
        }
    };

    match &outcome {
        CascadeOutcome::Selected(selection) => info!("{}: {}", target, selection),
        other => warn!("{}: {}", target, other),
    }
    outcome
}

fn resolve_unique(gilts: &[Gilt], matches: &MatchSet, rule: Rule) -> CascadeOutcome {
    // Every member of a relation has a redemption date, so `select` only
    // fails if `matches` was computed for a different slice.
    matches
        .unique()
        .and_then(|index| select(gilts, index, rule))
        .map(CascadeOutcome::Selected)
        .unwrap_or(CascadeOutcome::NoCandidate { rule })
}
