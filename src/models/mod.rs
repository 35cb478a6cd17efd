//! Forecasting models.

mod additive;
mod config;
mod traits;

pub mod seasonality;
pub mod trend;
pub mod uncertainty;

pub use additive::{forecast, AdditiveForecaster, MIN_PERIODS};
pub use config::{ForecastConfig, YearlySeasonality, DEFAULT_HORIZON, MAX_YEARLY_ORDER};
pub use traits::{BoxedForecaster, Forecaster};
