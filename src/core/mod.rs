//! Core data structures for monthly sales forecasting.

mod forecast;
mod period;
mod time_series;

pub use forecast::{ForecastPoint, ForecastResult, ModelState};
pub use period::Period;
pub use time_series::{MonthlySeries, TimeSeriesPoint};
