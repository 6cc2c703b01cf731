use crate::core::isin::Isin;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instrument type tag of the gilts that take part in benchmark selection.
pub const CONVENTIONAL: &str = "Conventional";

/// One gilt in issue, as published by the debt management office.
///
/// A gilt record is read-only input to every evaluation. Two of its fields
/// may be missing in the source data:
///
/// - `redemption_date`: a gilt without a usable date never matches any
///   date-based predicate and can never be selected.
/// - `total_amount_in_issue`: a gilt without an amount is not benchmark size.
///
/// Amounts are nominal outstanding in GBP millions, the same unit as
/// [`BENCHMARK_SIZE_THRESHOLD`](crate::rules::eligibility::BENCHMARK_SIZE_THRESHOLD).
///
/// # Examples
///
/// ```
/// use gilt_benchmark::core::gilt::Gilt;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let gilt = Gilt::new("GB00BMGR2809", "4 1/8% Treasury Gilt 2027")
///     .with_redemption_date(NaiveDate::from_ymd_opt(2027, 7, 22).unwrap())
///     .with_amount_in_issue(dec!(38_475));
///
/// assert!(gilt.is_conventional());
/// assert_eq!(gilt.amount_in_issue(), Some(dec!(38_475)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gilt {
    isin: Isin,
    instrument_name: String,
    instrument_type: String,
    redemption_date: Option<NaiveDate>,
    total_amount_in_issue: Option<Decimal>,
}

impl Gilt {
    /// Create a conventional gilt with no redemption date or amount yet.
    pub fn new(isin: impl Into<String>, instrument_name: impl Into<String>) -> Self {
        Self {
            isin: Isin::new(isin),
            instrument_name: instrument_name.into(),
            instrument_type: CONVENTIONAL.to_string(),
            redemption_date: None,
            total_amount_in_issue: None,
        }
    }

    /// Set the redemption (maturity) date.
    pub fn with_redemption_date(mut self, date: NaiveDate) -> Self {
        self.redemption_date = Some(date);
        self
    }

    /// Set the nominal amount outstanding.
    pub fn with_amount_in_issue(mut self, amount: Decimal) -> Self {
        self.total_amount_in_issue = Some(amount);
        self
    }

    /// Set the instrument type tag (e.g. "Index-linked").
    pub fn with_instrument_type(mut self, instrument_type: impl Into<String>) -> Self {
        self.instrument_type = instrument_type.into();
        self
    }

    // --- Accessors ---

    pub fn isin(&self) -> &Isin {
        &self.isin
    }

    pub fn instrument_name(&self) -> &str {
        &self.instrument_name
    }

    pub fn instrument_type(&self) -> &str {
        &self.instrument_type
    }

    pub fn redemption_date(&self) -> Option<NaiveDate> {
        self.redemption_date
    }

    pub fn amount_in_issue(&self) -> Option<Decimal> {
        self.total_amount_in_issue
    }

    /// Whether this gilt is in the conventional category. The source data
    /// pads the tag with trailing spaces, so comparison ignores them.
    pub fn is_conventional(&self) -> bool {
        self.instrument_type.trim() == CONVENTIONAL
    }
}

/// An ordered collection of gilts submitted to the engine.
///
/// Order is preserved through evaluation: the augmented output lists gilts
/// in the same order as they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiltSet {
    gilts: Vec<Gilt>,
}

impl GiltSet {
    pub fn new() -> Self {
        Self { gilts: Vec::new() }
    }

    pub fn add(&mut self, gilt: Gilt) {
        self.gilts.push(gilt);
    }

    pub fn gilts(&self) -> &[Gilt] {
        &self.gilts
    }

    pub fn len(&self) -> usize {
        self.gilts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gilts.is_empty()
    }

    /// Look up a gilt by ISIN.
    pub fn get(&self, isin: &Isin) -> Option<&Gilt> {
        self.gilts.iter().find(|g| g.isin() == isin)
    }

    /// The subset of conventional gilts, in input order.
    pub fn conventional(&self) -> GiltSet {
        self.gilts
            .iter()
            .filter(|g| g.is_conventional())
            .cloned()
            .collect()
    }

    /// Total nominal in issue across gilts that report an amount.
    pub fn total_in_issue(&self) -> Decimal {
        self.gilts.iter().filter_map(|g| g.amount_in_issue()).sum()
    }
}

impl FromIterator<Gilt> for GiltSet {
    fn from_iter<T: IntoIterator<Item = Gilt>>(iter: T) -> Self {
        Self {
            gilts: iter.into_iter().collect(),
        }
    }
}
