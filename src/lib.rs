//! # retail-forecast
//!
//! Retail sales analytics: load and clean transaction CSVs, aggregate them
//! into monthly series and summary tables, and forecast monthly sales with an
//! additive trend + yearly seasonality model.
//!
//! ```
//! use retail_forecast::prelude::*;
//!
//! let records = vec![
//!     Record::new("2023-01-05", "50"),
//!     Record::new("2023-01-20", "70"),
//!     Record::new("2023-02-03", "90"),
//! ];
//! let series = monthly_series(&records).unwrap();
//! assert_eq!(series.values(), vec![120.0, 90.0]);
//!
//! let result = forecast(&series, 3).unwrap();
//! assert_eq!(result.len(), 5);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod aggregate;
pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use error::{DataError, ForecastError, ParseError, Result};
pub use models::forecast;

pub mod prelude {
    pub use crate::aggregate::{aggregate, group_totals, monthly_series, GroupKey};
    pub use crate::core::{
        ForecastPoint, ForecastResult, ModelState, MonthlySeries, Period, TimeSeriesPoint,
    };
    pub use crate::data::{load_records, read_records, Record};
    pub use crate::error::{DataError, ForecastError, ParseError, Result};
    pub use crate::models::{
        forecast, AdditiveForecaster, ForecastConfig, Forecaster, YearlySeasonality,
    };
    pub use crate::pipeline::{forecast_sales, prepare_time_series};
}
