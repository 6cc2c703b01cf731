//! Synthetic gilt books.
//!
//! Generates random conventional gilt collections to exercise the cascade
//! under realistic shapes: several maturities per year, a mix of benchmark
//! and sub-benchmark sizes, and the occasional record with no usable
//! redemption date.

use crate::core::gilt::{Gilt, GiltSet};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Configuration for generating a synthetic gilt book.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Number of gilts to generate.
    pub gilt_count: usize,
    /// First redemption year (inclusive).
    pub first_year: i32,
    /// Last redemption year (inclusive).
    pub last_year: i32,
    /// Smallest amount in issue (GBP millions).
    pub min_amount: u32,
    /// Largest amount in issue (GBP millions).
    pub max_amount: u32,
    /// Probability (0.0 to 1.0) that a gilt has no redemption date. Values
    /// outside the range are clamped; a non-finite value means 0.0.
    pub missing_date_rate: f64,
    /// Seed for reproducible books. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            gilt_count: 60,
            first_year: 2025,
            last_year: 2073,
            min_amount: 500,
            max_amount: 45_000,
            missing_date_rate: 0.0,
            seed: None,
        }
    }
}

/// Gilts redeem on the 7th, 22nd or last business-ish day of a month.
const REDEMPTION_DAYS: [u32; 3] = [7, 22, 31];

fn redemption_date(rng: &mut StdRng, first_year: i32, last_year: i32) -> Option<NaiveDate> {
    let year = rng.gen_range(first_year..=last_year.max(first_year));
    let month = rng.gen_range(1..=12);
    let day = REDEMPTION_DAYS[rng.gen_range(0..REDEMPTION_DAYS.len())];
    // Clamp the 31st back into short months.
    (0..4).find_map(|back| NaiveDate::from_ymd_opt(year, month, day - back))
}

/// Generate a synthetic conventional gilt book.
///
/// ISINs are unique within the book (`GBSYN0000001`, ...).
pub fn generate_gilt_book(config: &BookConfig) -> GiltSet {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // NaN passes through `clamp` and would make `gen_bool` panic.
    let missing_rate = if config.missing_date_rate.is_finite() {
        config.missing_date_rate.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let min_amount = config.min_amount.min(config.max_amount);

    (0..config.gilt_count)
        .map(|i| {
            let isin = format!("GBSYN{:07}", i + 1);
            let amount = Decimal::from(rng.gen_range(min_amount..=config.max_amount));
            let coupon_eighths = rng.gen_range(1..=48u32);
            let date = if rng.gen_bool(missing_rate) {
                None
            } else {
                redemption_date(&mut rng, config.first_year, config.last_year)
            };

            let name = match date {
                Some(d) => format!(
                    "{}/8% Treasury Gilt {}",
                    coupon_eighths,
                    d.format("%Y")
                ),
                None => format!("{}/8% Treasury Stock", coupon_eighths),
            };
            let gilt = Gilt::new(isin, name).with_amount_in_issue(amount);
            match date {
                Some(d) => gilt.with_redemption_date(d),
                None => gilt,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluation::BenchmarkEngine;
    use chrono::Datelike;
    use std::collections::HashSet;

    #[test]
    fn test_book_generation() {
        let config = BookConfig {
            gilt_count: 40,
            seed: Some(7),
            ..Default::default()
        };
        let book = generate_gilt_book(&config);
        assert_eq!(book.len(), 40);

        let isins: HashSet<_> = book.gilts().iter().map(|g| g.isin().clone()).collect();
        assert_eq!(isins.len(), 40);

        for gilt in book.gilts() {
            assert!(gilt.is_conventional());
            let year = gilt.redemption_date().unwrap().year();
            assert!((config.first_year..=config.last_year).contains(&year));
            let amount = gilt.amount_in_issue().unwrap();
            assert!(amount >= Decimal::from(config.min_amount));
            assert!(amount <= Decimal::from(config.max_amount));
        }
    }

    #[test]
    fn test_seeded_books_are_reproducible() {
        let config = BookConfig {
            seed: Some(42),
            missing_date_rate: 0.2,
            ..Default::default()
        };
        assert_eq!(generate_gilt_book(&config), generate_gilt_book(&config));
    }

    #[test]
    fn test_missing_dates() {
        let config = BookConfig {
            gilt_count: 10,
            missing_date_rate: 1.0,
            seed: Some(1),
            ..Default::default()
        };
        let book = generate_gilt_book(&config);
        assert!(book.gilts().iter().all(|g| g.redemption_date().is_none()));

        let target = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        assert!(BenchmarkEngine::default().select_benchmark(&book, target).is_none());
    }

    #[test]
    fn test_non_finite_missing_rate_keeps_every_date() {
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = BookConfig {
                gilt_count: 20,
                missing_date_rate: rate,
                seed: Some(3),
                ..Default::default()
            };
            let book = generate_gilt_book(&config);
            assert_eq!(book.len(), 20);
            assert!(book.gilts().iter().all(|g| g.redemption_date().is_some()));
        }
    }
}
