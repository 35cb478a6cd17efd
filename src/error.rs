//! Error types for the retail-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building a series or fitting a forecast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Fewer observed periods than the model needs.
    #[error("insufficient data: need at least {needed} periods, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Forecast horizon must be at least one period.
    #[error("invalid horizon {horizon}: must forecast at least one period")]
    InvalidHorizon { horizon: usize },

    /// Numerical failure while fitting the model.
    #[error("model fit failed: {0}")]
    ModelFit(String),

    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The series violates an ordering or finiteness invariant.
    #[error("invalid series: {0}")]
    InvalidSeries(String),
}

/// Why a single record could not be used.
///
/// These never abort an aggregation: the record is dropped and counted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("unparseable date '{0}'")]
    InvalidDate(String),

    #[error("unparseable amount '{0}'")]
    InvalidAmount(String),

    #[error("negative amount {0}")]
    NegativeAmount(f64),
}

/// Errors raised at the CSV boundary.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
