use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("dataset is empty; pass both --start and --end")]
    NoDefaultWindow,

    #[error("missing required column (one of: {candidates})")]
    MissingColumn { candidates: String },

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Non-fatal conditions attached to a dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    EmptyResult { start: NaiveDate, end: NaiveDate },
    UncategorizedRows { count: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyResult { start, end } => {
                write!(f, "no orders between {start} and {end}; averages are undefined")
            }
            Warning::UncategorizedRows { count } => {
                write!(f, "{count} order lines without a product category were left out of the category summary")
            }
        }
    }
}
