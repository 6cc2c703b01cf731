use chrono::{Datelike, NaiveDate};
use gilt_benchmark::config::EngineConfig;
use gilt_benchmark::core::exclusion::ExclusionList;
use gilt_benchmark::core::gilt::{Gilt, GiltSet};
use gilt_benchmark::core::isin::Isin;
use gilt_benchmark::engine::evaluation::BenchmarkEngine;
use gilt_benchmark::rules::cascade::Rule;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Redemption dates clustered in a few years to make same-year and
/// same-month collisions likely.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2026i32..2032, 1u32..=12, prop::sample::select(vec![7u32, 22, 28]))
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Amounts on both sides of the benchmark-size threshold.
fn arb_amount() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::weighted(0.9, (1_000u32..40_000u32).prop_map(Decimal::from))
}

fn arb_gilt_set() -> impl Strategy<Value = GiltSet> {
    prop::collection::vec((prop::option::weighted(0.9, arb_date()), arb_amount()), 0..25)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (date, amount))| {
                    let mut gilt = Gilt::new(format!("GBPROP{:05}", i), format!("Gilt {}", i));
                    if let Some(d) = date {
                        gilt = gilt.with_redemption_date(d);
                    }
                    if let Some(a) = amount {
                        gilt = gilt.with_amount_in_issue(a);
                    }
                    gilt
                })
                .collect()
        })
}

/// Exclude a random subset of the ISINs the generator can produce.
fn arb_exclusions() -> impl Strategy<Value = ExclusionList> {
    prop::collection::vec(0usize..25, 0..4).prop_map(|idx| {
        idx.into_iter()
            .map(|i| Isin::new(format!("GBPROP{:05}", i)))
            .collect()
    })
}

fn arb_target() -> impl Strategy<Value = NaiveDate> {
    (2025i32..2033, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    // ===================================================================
    // At most one gilt is flagged as ICMA benchmark, and it is the one
    // reported in the selection.
    // ===================================================================
    #[test]
    fn at_most_one_benchmark(
        gilts in arb_gilt_set(),
        exclusions in arb_exclusions(),
        target in arb_target(),
    ) {
        let engine = BenchmarkEngine::new(EngineConfig::new(exclusions));
        let eval = engine.evaluate(&gilts, target);
        let flagged: Vec<usize> = eval
            .gilts()
            .iter()
            .enumerate()
            .filter(|(_, g)| g.predicates.is_icma_benchmark)
            .map(|(i, _)| i)
            .collect();
        prop_assert!(flagged.len() <= 1, "{} gilts flagged", flagged.len());
        prop_assert_eq!(flagged.first().copied(), eval.selection().map(|s| s.index));
    }

    // ===================================================================
    // The selected gilt is benchmark eligible and has a redemption date.
    // ===================================================================
    #[test]
    fn selection_is_eligible_and_dated(
        gilts in arb_gilt_set(),
        exclusions in arb_exclusions(),
        target in arb_target(),
    ) {
        let engine = BenchmarkEngine::new(EngineConfig::new(exclusions.clone()));
        let eval = engine.evaluate(&gilts, target);
        if let Some(benchmark) = eval.benchmark() {
            prop_assert!(benchmark.predicates.is_benchmark_eligible);
            prop_assert!(benchmark.gilt.redemption_date().is_some());
            prop_assert!(!exclusions.is_excluded(benchmark.gilt.isin()));
        }
    }

    // ===================================================================
    // Date predicates are only ever true for eligible, dated gilts.
    // ===================================================================
    #[test]
    fn date_predicates_need_eligibility_and_date(
        gilts in arb_gilt_set(),
        target in arb_target(),
    ) {
        let eval = BenchmarkEngine::default().evaluate(&gilts, target);
        for row in eval.gilts() {
            let p = &row.predicates;
            let any_date_flag = p.same_year
                || p.same_year_and_month
                || p.is_unique_same_year
                || p.is_nearest_shorter
                || p.is_nearest_shorter_in_calendar_year
                || p.is_nearest_longer_in_calendar_year;
            if any_date_flag {
                prop_assert!(p.is_benchmark_eligible);
                prop_assert!(row.gilt.redemption_date().is_some());
            }
        }
    }

    // ===================================================================
    // The rule that fired agrees with the selected gilt's date.
    // ===================================================================
    #[test]
    fn rule_matches_selected_date(
        gilts in arb_gilt_set(),
        target in arb_target(),
    ) {
        let eval = BenchmarkEngine::default().evaluate(&gilts, target);
        if let Some(selection) = eval.selection() {
            let date = selection.redemption_date;
            match selection.rule {
                Rule::SoleInYear => prop_assert_eq!(date.year(), target.year()),
                Rule::NearestShorter => {
                    prop_assert!(date < target);
                    prop_assert_eq!(eval.same_year_count(), 0);
                }
                Rule::SameMonth => {
                    prop_assert_eq!((date.year(), date.month()), (target.year(), target.month()));
                }
                Rule::NearestShorterInYear => {
                    prop_assert!(date < target);
                    prop_assert_eq!(date.year(), target.year());
                }
                Rule::NearestLongerInYear => {
                    prop_assert!(date > target);
                    prop_assert_eq!(date.year(), target.year());
                }
            }
        }
    }

    // ===================================================================
    // Evaluation is deterministic: re-running yields identical output.
    // ===================================================================
    #[test]
    fn evaluation_is_idempotent(
        gilts in arb_gilt_set(),
        exclusions in arb_exclusions(),
        target in arb_target(),
    ) {
        let engine = BenchmarkEngine::new(EngineConfig::new(exclusions));
        let first = engine.evaluate(&gilts, target);
        let second = engine.evaluate(&gilts, target);
        prop_assert_eq!(&first, &second);
        let selected = engine.select_benchmark(&gilts, target);
        prop_assert_eq!(selected.as_ref(), first.selection());
    }

    // ===================================================================
    // Sweep accounting: every day is either selected by one rule or
    // counted as no selection, and selected/never-selected partition the
    // input ISINs.
    // ===================================================================
    #[test]
    fn sweep_accounts_for_every_day(
        gilts in arb_gilt_set(),
        start in arb_target(),
        days in 0i64..60,
    ) {
        let end = start + chrono::Duration::days(days);
        let report = BenchmarkEngine::default().sweep(&gilts, start, end).unwrap();
        prop_assert_eq!(report.day_count() as i64, days + 1);

        let by_rule: usize = Rule::ALL.iter().map(|r| report.rule_count(*r)).sum();
        prop_assert_eq!(by_rule + report.no_selection_count(), report.day_count());

        let total = report.selected().len() + report.never_selected().len();
        prop_assert_eq!(total, gilts.len());
    }
}
