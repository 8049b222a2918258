//! Error types for the vacancy ingestion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort a pipeline run.
///
/// Rows with the wrong column count or an empty field are not errors: they are
/// filtered out before a [`crate::vacancy::VacancyRecord`] is ever built.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Currency code missing from the conversion table
    #[error("unknown currency code: {0:?}")]
    UnknownCurrency(String),

    /// Leading token of the publication date is not an integer year
    #[error("malformed publication date: {0:?}")]
    MalformedDate(String),

    /// Salary bound is not a finite, non-negative number
    #[error("malformed salary value: {0:?}")]
    MalformedSalary(String),

    /// Year parsed correctly but lies outside the tracked range
    #[error("year {year} is outside the supported range {first}..={last}")]
    YearOutOfRange { year: i32, first: i32, last: i32 },

    /// Header has a column count no row layout maps from
    #[error("unsupported header layout with {0} columns")]
    UnsupportedLayout(usize),

    /// Input file is missing or cannot be opened
    #[error("cannot open input file {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader failure while streaming rows
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
