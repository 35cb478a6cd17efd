//! Forecaster trait defining the common interface for all models.

use crate::core::{ForecastResult, MonthlySeries};
use crate::error::Result;

/// Common interface for monthly forecasting models.
///
/// A forecaster is immutable configuration. Every call fits a fresh model on
/// the given series and returns it inside the [`ForecastResult`]; nothing is
/// kept between calls, so one instance can serve many series concurrently.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit on `series` and forecast `horizon` months past its last period.
    fn forecast(&self, series: &MonthlySeries, horizon: usize) -> Result<ForecastResult>;

    /// Get the model name.
    fn name(&self) -> &str;
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use retail_forecast::models::{AdditiveForecaster, BoxedForecaster, Forecaster};
///
/// let model: BoxedForecaster = Box::new(AdditiveForecaster::default());
/// assert_eq!(model.name(), "Additive");
/// ```
pub type BoxedForecaster = Box<dyn Forecaster + Send + Sync>;
