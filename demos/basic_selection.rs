//! Benchmark selection walkthrough.
//!
//! Runs the R7.4 cascade against a small gilt book for a handful of new
//! issue maturities, one per rule, and shows how an exclusion changes the
//! answer.

use chrono::NaiveDate;
use gilt_benchmark::config::EngineConfig;
use gilt_benchmark::core::exclusion::ExclusionList;
use gilt_benchmark::core::gilt::{Gilt, GiltSet};
use gilt_benchmark::core::isin::Isin;
use gilt_benchmark::engine::evaluation::BenchmarkEngine;
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  gilt-benchmark: ICMA R7.4 Selection Example ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let book: GiltSet = vec![
        Gilt::new("GB00BMGR2809", "4 1/8% Treasury Gilt 2027")
            .with_redemption_date(ymd(2027, 7, 22))
            .with_amount_in_issue(dec!(38_475)),
        Gilt::new("GB00BL68HJ26", "0 1/8% Treasury Gilt 2028")
            .with_redemption_date(ymd(2028, 1, 31))
            .with_amount_in_issue(dec!(33_122)),
        Gilt::new("GB00BMF9LJ15", "4 1/2% Treasury Gilt 2028")
            .with_redemption_date(ymd(2028, 6, 7))
            .with_amount_in_issue(dec!(36_000)),
        Gilt::new("GB00B16NNR78", "4 1/4% Treasury Gilt 2027")
            .with_redemption_date(ymd(2027, 12, 7))
            .with_amount_in_issue(dec!(8_100)),
        Gilt::new("GB00BLPK7227", "0 1/2% Treasury Gilt 2029")
            .with_redemption_date(ymd(2029, 1, 31))
            .with_amount_in_issue(dec!(30_900)),
        Gilt::new("GB00BNNGP668", "4 3/4% Treasury Gilt 2030")
            .with_redemption_date(ymd(2030, 12, 7))
            .with_amount_in_issue(dec!(40_200)),
    ]
    .into_iter()
    .collect();

    let engine = BenchmarkEngine::default();

    let scenarios = [
        ("single AB in 2029", ymd(2029, 9, 1)),
        ("no AB in 2031", ymd(2031, 3, 15)),
        ("same month in 2028", ymd(2028, 6, 30)),
        ("between 2028 maturities", ymd(2028, 4, 15)),
        ("before any AB", ymd(2026, 6, 1)),
    ];

    for (label, date) in scenarios {
        println!("━━━ {} ({}) ━━━", label, date);
        println!("{}\n", engine.outcome(&book, date));
    }

    println!("━━━ Full evaluation for 2028-04-15 ━━━\n");
    println!("{}", engine.evaluate(&book, ymd(2028, 4, 15)));

    println!("━━━ Excluding GB00BL68HJ26 ━━━\n");
    let exclusions: ExclusionList = std::iter::once(Isin::new("GB00BL68HJ26")).collect();
    let restricted = BenchmarkEngine::new(EngineConfig::new(exclusions));
    println!("{}", restricted.outcome(&book, ymd(2028, 4, 15)));
}
