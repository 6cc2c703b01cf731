use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reading gilt records from the upstream data file.
///
/// Only structural problems are errors. An unusable redemption date or
/// amount on an individual record is not: the field is treated as absent.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read gilt file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid gilt file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("sweep start {from} is after sweep end {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

/// Top-level error for callers driving the engine end to end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Sweep(#[from] SweepError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
