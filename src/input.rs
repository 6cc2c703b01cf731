//! Gilt record file adapter.
//!
//! Reads the JSON form of a "gilts in issue" table into a [`GiltSet`], and
//! writes one back out. Field names follow the engine's own naming; the
//! upper-case column names of the published table are accepted as aliases.
//!
//! ```json
//! {
//!   "gilts": [
//!     {
//!       "isin": "GB00BMGR2809",
//!       "instrument_name": "4 1/8% Treasury Gilt 2027",
//!       "instrument_type": "Conventional ",
//!       "redemption_date": "2027-07-22",
//!       "total_amount_in_issue": "38475"
//!     }
//!   ]
//! }
//! ```
//!
//! A redemption date or amount that cannot be parsed is logged and treated
//! as absent; it never fails the load.

use crate::core::gilt::{Gilt, GiltSet, CONVENTIONAL};
use crate::error::InputError;
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Parse an amount cell, published either as a JSON number or as text
/// (possibly with thousands separators). Any other JSON type is unusable.
fn parse_amount(cell: &Value) -> Option<Decimal> {
    let text = match cell {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace(',', ""),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GiltRecord {
    #[serde(alias = "ISIN_CODE")]
    isin: String,
    #[serde(alias = "INSTRUMENT_NAME", default)]
    instrument_name: String,
    #[serde(alias = "INSTRUMENT_TYPE", default = "default_instrument_type")]
    instrument_type: String,
    #[serde(alias = "REDEMPTION_DATE", default)]
    redemption_date: Option<Value>,
    #[serde(alias = "TOTAL_AMOUNT_IN_ISSUE", default)]
    total_amount_in_issue: Option<Value>,
}

fn default_instrument_type() -> String {
    CONVENTIONAL.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct GiltFile {
    gilts: Vec<GiltRecord>,
}

/// Parse a redemption date cell: `YYYY-MM-DD`, optionally followed by a
/// time component as in the published XML (`2027-07-22T00:00:00`).
pub fn parse_redemption_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .ok()
}

impl GiltRecord {
    fn into_gilt(self) -> Gilt {
        let mut gilt = Gilt::new(self.isin, self.instrument_name)
            .with_instrument_type(self.instrument_type);

        match self.redemption_date {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) if raw.trim().is_empty() => {}
            Some(cell) => match cell.as_str().and_then(parse_redemption_date) {
                Some(date) => gilt = gilt.with_redemption_date(date),
                None => warn!("{}: unusable redemption date {}, treating as absent", gilt.isin(), cell),
            },
        }

        match self.total_amount_in_issue {
            None | Some(Value::Null) => {}
            Some(cell) => match parse_amount(&cell) {
                Some(amount) => gilt = gilt.with_amount_in_issue(amount),
                None => warn!("{}: unusable amount in issue {}, treating as absent", gilt.isin(), cell),
            },
        }
        gilt
    }

    fn from_gilt(gilt: &Gilt) -> Self {
        Self {
            isin: gilt.isin().to_string(),
            instrument_name: gilt.instrument_name().to_string(),
            instrument_type: gilt.instrument_type().to_string(),
            redemption_date: gilt
                .redemption_date()
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
            total_amount_in_issue: gilt.amount_in_issue().map(|a| Value::String(a.to_string())),
        }
    }
}

/// Parse every record of a gilt file, in file order. No category filter is
/// applied; see [`GiltSet::conventional`].
pub fn parse_gilts(json: &str) -> Result<GiltSet, InputError> {
    let file: GiltFile = serde_json::from_str(json)?;
    Ok(file.gilts.into_iter().map(GiltRecord::into_gilt).collect())
}

pub fn load_gilts(path: impl AsRef<Path>) -> Result<GiltSet, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_gilts(&content)
}

/// Render a gilt set in the file format read by [`parse_gilts`].
pub fn gilts_to_json(gilts: &GiltSet) -> Result<String, serde_json::Error> {
    let file = GiltFile {
        gilts: gilts.gilts().iter().map(GiltRecord::from_gilt).collect(),
    };
    serde_json::to_string_pretty(&file)
}
