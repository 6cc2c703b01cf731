use crate::config::EngineConfig;
use crate::core::gilt::{Gilt, GiltSet};
use crate::rules::cascade::{run_cascade, CascadeOutcome, Selection};
use crate::rules::eligibility::{classify_all, Eligibility};
use crate::rules::temporal::{DateFlags, DateRelations};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every derived predicate of one gilt for one target date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicates {
    pub is_size_benchmark: bool,
    pub is_appropriate: bool,
    pub is_benchmark_eligible: bool,
    pub same_year: bool,
    pub same_year_and_month: bool,
    pub is_unique_same_year: bool,
    pub is_nearest_shorter: bool,
    pub is_nearest_shorter_in_calendar_year: bool,
    pub is_nearest_longer_in_calendar_year: bool,
    pub is_icma_benchmark: bool,
}

impl Predicates {
    fn new(eligibility: Eligibility, dates: DateFlags, is_icma_benchmark: bool) -> Self {
        Self {
            is_size_benchmark: eligibility.is_size_benchmark,
            is_appropriate: eligibility.is_appropriate,
            is_benchmark_eligible: eligibility.is_benchmark_eligible(),
            same_year: dates.same_year,
            same_year_and_month: dates.same_year_and_month,
            is_unique_same_year: dates.is_unique_same_year,
            is_nearest_shorter: dates.is_nearest_shorter,
            is_nearest_shorter_in_calendar_year: dates.is_nearest_shorter_in_calendar_year,
            is_nearest_longer_in_calendar_year: dates.is_nearest_longer_in_calendar_year,
            is_icma_benchmark,
        }
    }
}

/// A gilt together with its predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedGilt {
    pub gilt: Gilt,
    pub predicates: Predicates,
}

/// The augmented gilt collection and the cascade outcome for one target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    target: NaiveDate,
    gilts: Vec<EvaluatedGilt>,
    outcome: CascadeOutcome,
}

impl Evaluation {
    pub fn target(&self) -> NaiveDate {
        self.target
    }

    /// Gilts in input order, with predicates.
    pub fn gilts(&self) -> &[EvaluatedGilt] {
        &self.gilts
    }

    pub fn outcome(&self) -> &CascadeOutcome {
        &self.outcome
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.outcome.selection()
    }

    /// The gilt flagged as ICMA benchmark, if any.
    pub fn benchmark(&self) -> Option<&EvaluatedGilt> {
        self.gilts.iter().find(|g| g.predicates.is_icma_benchmark)
    }

    pub fn gilt_count(&self) -> usize {
        self.gilts.len()
    }

    /// Number of appropriate benchmarks (ABs).
    pub fn eligible_count(&self) -> usize {
        self.gilts
            .iter()
            .filter(|g| g.predicates.is_benchmark_eligible)
            .count()
    }

    /// Number of ABs maturing in the target's calendar year.
    pub fn same_year_count(&self) -> usize {
        self.gilts.iter().filter(|g| g.predicates.same_year).count()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ICMA Benchmark for {} ===", self.target)?;
        writeln!(f, "Gilts in issue:        {}", self.gilt_count())?;
        writeln!(
            f,
            "Removed (size/approp): {}",
            self.gilt_count() - self.eligible_count()
        )?;
        writeln!(f, "Appropriate (AB):      {}", self.eligible_count())?;
        writeln!(f, "AB in same year:       {}", self.same_year_count())?;
        writeln!(f, "Outcome:               {}", self.outcome)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<14} {:<12} {:>10}  BM AP AB SY SM US NS NSY NLY ICMA  {}",
            "ISIN", "REDEMPTION", "IN ISSUE", "NAME"
        )?;
        for row in &self.gilts {
            let p = &row.predicates;
            let date = row
                .gilt
                .redemption_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let amount = row
                .gilt
                .amount_in_issue()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<14} {:<12} {:>10}  {}  {}  {}  {}  {}  {}  {}  {}   {}   {}     {}",
                row.gilt.isin().as_str(),
                date,
                amount,
                mark(p.is_size_benchmark),
                mark(p.is_appropriate),
                mark(p.is_benchmark_eligible),
                mark(p.same_year),
                mark(p.same_year_and_month),
                mark(p.is_unique_same_year),
                mark(p.is_nearest_shorter),
                mark(p.is_nearest_shorter_in_calendar_year),
                mark(p.is_nearest_longer_in_calendar_year),
                mark(p.is_icma_benchmark),
                row.gilt.instrument_name(),
            )?;
        }
        Ok(())
    }
}

fn mark(flag: bool) -> char {
    if flag {
        'Y'
    } else {
        '.'
    }
}

/// The benchmark selection engine.
///
/// Runs classifier, date relations and cascade, in that order, for one
/// target maturity. Every run is a pure function of the gilt collection,
/// the configuration and the target date.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkEngine {
    config: EngineConfig,
}

impl BenchmarkEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Eligibility of every gilt; independent of the target date.
    pub fn classify(&self, gilts: &GiltSet) -> Vec<Eligibility> {
        classify_all(gilts.gilts(), self.config.exclusions())
    }

    /// Full evaluation: the augmented collection plus the outcome.
    pub fn evaluate(&self, gilts: &GiltSet, target: NaiveDate) -> Evaluation {
        let eligibility = self.classify(gilts);
        let (relations, outcome) = Self::decide(gilts, &eligibility, target);
        let selected = outcome.selected_index();

        let rows = gilts
            .gilts()
            .iter()
            .zip(&eligibility)
            .enumerate()
            .map(|(i, (gilt, e))| EvaluatedGilt {
                gilt: gilt.clone(),
                predicates: Predicates::new(*e, relations.flags(i), selected == Some(i)),
            })
            .collect();

        Evaluation {
            target,
            gilts: rows,
            outcome,
        }
    }

    /// Just the cascade outcome, without building the augmented collection.
    pub fn outcome(&self, gilts: &GiltSet, target: NaiveDate) -> CascadeOutcome {
        let eligibility = self.classify(gilts);
        Self::decide(gilts, &eligibility, target).1
    }

    /// The selected benchmark, if the cascade identifies one.
    pub fn select_benchmark(&self, gilts: &GiltSet, target: NaiveDate) -> Option<Selection> {
        self.outcome(gilts, target).into_selection()
    }

    /// Date relations and cascade for precomputed eligibility.
    pub(crate) fn decide(
        gilts: &GiltSet,
        eligibility: &[Eligibility],
        target: NaiveDate,
    ) -> (DateRelations, CascadeOutcome) {
        debug!(
            "{}: {} gilt(s), {} appropriate benchmark(s)",
            target,
            gilts.len(),
            eligibility.iter().filter(|e| e.is_benchmark_eligible()).count()
        );
        let relations = DateRelations::compute(gilts.gilts(), eligibility, target);
        let outcome = run_cascade(gilts.gilts(), &relations);
        (relations, outcome)
    }
}
