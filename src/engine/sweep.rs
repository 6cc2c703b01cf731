//! Validation sweep: run the cascade for every day of a date range and
//! summarise how often, and by which rule, a benchmark was identified.

use crate::core::gilt::GiltSet;
use crate::core::isin::Isin;
use crate::engine::evaluation::BenchmarkEngine;
use crate::error::SweepError;
use crate::rules::cascade::Rule;
use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Outcome of the cascade for one day of the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub date: NaiveDate,
    pub selection: Option<Isin>,
    pub rule: Option<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    from: NaiveDate,
    to: NaiveDate,
    points: Vec<SweepPoint>,
    rule_counts: BTreeMap<Rule, usize>,
    selected: BTreeSet<Isin>,
    never_selected: Vec<Isin>,
}

impl SweepReport {
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// One point per day, in date order.
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn day_count(&self) -> usize {
        self.points.len()
    }

    pub fn no_selection_count(&self) -> usize {
        self.points.iter().filter(|p| p.selection.is_none()).count()
    }

    /// Share of days (0.0 to 1.0) on which no benchmark was identified.
    pub fn no_selection_ratio(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.no_selection_count() as f64 / self.points.len() as f64
    }

    /// Number of days the given rule produced the selection.
    pub fn rule_count(&self, rule: Rule) -> usize {
        self.rule_counts.get(&rule).copied().unwrap_or(0)
    }

    /// Gilts selected on at least one day, sorted by ISIN.
    pub fn selected(&self) -> &BTreeSet<Isin> {
        &self.selected
    }

    /// Gilts of the input never selected on any day, in input order.
    pub fn never_selected(&self) -> &[Isin] {
        &self.never_selected
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Benchmark Sweep {} to {} ===", self.from, self.to)?;
        writeln!(f, "Days evaluated:      {}", self.day_count())?;
        writeln!(
            f,
            "No benchmark:        {} ({:.1}%)",
            self.no_selection_count(),
            self.no_selection_ratio() * 100.0
        )?;
        for rule in Rule::ALL {
            writeln!(f, "  {:<12} {:>6} day(s)", rule.code(), self.rule_count(rule))?;
        }
        writeln!(f, "\n--- Selected at least once ({}) ---", self.selected.len())?;
        for isin in &self.selected {
            writeln!(f, "  {}", isin)?;
        }
        writeln!(f, "\n--- Never selected ({}) ---", self.never_selected.len())?;
        for isin in &self.never_selected {
            writeln!(f, "  {}", isin)?;
        }
        Ok(())
    }
}

impl BenchmarkEngine {
    /// Evaluate every day from `from` to `to` inclusive.
    ///
    /// Eligibility does not depend on the target date, so it is classified
    /// once; each day then recomputes date relations and the cascade from
    /// scratch. Days are evaluated in parallel and reported in date order.
    pub fn sweep(
        &self,
        gilts: &GiltSet,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SweepReport, SweepError> {
        if from > to {
            return Err(SweepError::InvalidRange { from, to });
        }

        let eligibility = self.classify(gilts);
        let dates: Vec<NaiveDate> = from.iter_days().take_while(|d| *d <= to).collect();
        let points: Vec<SweepPoint> = dates
            .par_iter()
            .map(|&date| {
                let (_, outcome) = Self::decide(gilts, &eligibility, date);
                match outcome.into_selection() {
                    Some(selection) => SweepPoint {
                        date,
                        selection: Some(selection.isin),
                        rule: Some(selection.rule),
                    },
                    None => SweepPoint {
                        date,
                        selection: None,
                        rule: None,
                    },
                }
            })
            .collect();

        let mut rule_counts: BTreeMap<Rule, usize> = BTreeMap::new();
        let mut selected: BTreeSet<Isin> = BTreeSet::new();
        for point in &points {
            if let (Some(isin), Some(rule)) = (&point.selection, point.rule) {
                *rule_counts.entry(rule).or_insert(0) += 1;
                selected.insert(isin.clone());
            }
        }

        let mut seen = BTreeSet::new();
        let never_selected = gilts
            .gilts()
            .iter()
            .map(|g| g.isin())
            .filter(|isin| !selected.contains(*isin) && seen.insert(*isin))
            .cloned()
            .collect();

        let report = SweepReport {
            from,
            to,
            points,
            rule_counts,
            selected,
            never_selected,
        };
        info!(
            "sweep {}..={}: {} day(s), {} without benchmark",
            from,
            to,
            report.day_count(),
            report.no_selection_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gilt::Gilt;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book() -> GiltSet {
        vec![
            Gilt::new("Y2027", "Treasury 2027")
                .with_redemption_date(ymd(2027, 7, 22))
                .with_amount_in_issue(dec!(30_000)),
            Gilt::new("Y2029", "Treasury 2029")
                .with_redemption_date(ymd(2029, 1, 22))
                .with_amount_in_issue(dec!(30_000)),
            Gilt::new("SMALL", "Small 2028")
                .with_redemption_date(ymd(2028, 6, 7))
                .with_amount_in_issue(dec!(1_000)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sweep_covers_inclusive_range() {
        let report = BenchmarkEngine::default()
            .sweep(&book(), ymd(2028, 12, 30), ymd(2029, 1, 2))
            .unwrap();
        assert_eq!(report.day_count(), 4);
        assert_eq!(report.points()[0].date, ymd(2028, 12, 30));
        assert_eq!(report.points()[3].date, ymd(2029, 1, 2));

        // 2028 has no AB: nearest shorter is 2027. 2029 has exactly one AB.
        assert_eq!(report.points()[0].selection, Some(Isin::new("Y2027")));
        assert_eq!(report.points()[0].rule, Some(Rule::NearestShorter));
        assert_eq!(report.points()[2].selection, Some(Isin::new("Y2029")));
        assert_eq!(report.rule_count(Rule::NearestShorter), 2);
        assert_eq!(report.rule_count(Rule::SoleInYear), 2);
        assert_eq!(report.never_selected(), &[Isin::new("SMALL")]);
    }

    #[test]
    fn test_days_without_benchmark_are_counted() {
        // Before any AB matures, R7.4(b) has no candidate.
        let report = BenchmarkEngine::default()
            .sweep(&book(), ymd(2026, 1, 1), ymd(2026, 1, 10))
            .unwrap();
        assert_eq!(report.no_selection_count(), 10);
        assert_relative_eq!(report.no_selection_ratio(), 1.0);
        assert!(report.selected().is_empty());
        assert_eq!(report.never_selected().len(), 3);
    }

    #[test]
    fn test_sweep_agrees_with_single_day_selection() {
        let engine = BenchmarkEngine::default();
        let gilts = book();
        let report = engine.sweep(&gilts, ymd(2026, 11, 1), ymd(2029, 3, 1)).unwrap();

        let mut previous = None;
        for point in report.points() {
            assert!(previous.map_or(true, |d| d < point.date));
            previous = Some(point.date);
            let expected = engine.select_benchmark(&gilts, point.date);
            assert_eq!(point.selection, expected.as_ref().map(|s| s.isin.clone()));
            assert_eq!(point.rule, expected.map(|s| s.rule));
        }
        let by_rule: usize = Rule::ALL.iter().map(|r| report.rule_count(*r)).sum();
        assert_eq!(by_rule + report.no_selection_count(), report.day_count());
    }

    #[test]
    fn test_single_day_sweep() {
        let report = BenchmarkEngine::default()
            .sweep(&book(), ymd(2027, 2, 1), ymd(2027, 2, 1))
            .unwrap();
        assert_eq!(report.day_count(), 1);
        assert_relative_eq!(report.no_selection_ratio(), 0.0);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let result = BenchmarkEngine::default().sweep(&book(), ymd(2027, 2, 2), ymd(2027, 2, 1));
        assert!(matches!(result, Err(SweepError::InvalidRange { .. })));
    }
}
