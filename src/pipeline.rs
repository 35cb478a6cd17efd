//! End-to-end entry points: records to monthly series to forecast.

use crate::aggregate::monthly_series;
use crate::core::{ForecastResult, MonthlySeries};
use crate::data::Record;
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, MIN_PERIODS};
use tracing::debug;

/// Aggregate records into the monthly series fed to a forecaster.
pub fn prepare_time_series(records: &[Record]) -> Result<MonthlySeries> {
    let series = monthly_series(records)?;
    debug!(
        records = records.len(),
        periods = series.len(),
        gaps = series.missing_periods().len(),
        "prepared monthly series"
    );
    Ok(series)
}

/// Aggregate `records` and forecast `horizon` months ahead with `model`.
///
/// # Example
///
/// ```
/// use retail_forecast::data::Record;
/// use retail_forecast::models::AdditiveForecaster;
/// use retail_forecast::pipeline::forecast_sales;
///
/// let records = vec![
///     Record::new("2023-01-05", "50"),
///     Record::new("2023-02-11", "80"),
///     Record::new("2023-03-02", "65"),
/// ];
/// let result = forecast_sales(&records, &AdditiveForecaster::default(), 6).unwrap();
/// assert_eq!(result.len(), 9);
/// ```
pub fn forecast_sales<F: Forecaster + ?Sized>(
    records: &[Record],
    model: &F,
    horizon: usize,
) -> Result<ForecastResult> {
    let series = prepare_time_series(records)?;
    if series.len() < MIN_PERIODS {
        return Err(ForecastError::InsufficientData {
            needed: MIN_PERIODS,
            got: series.len(),
        });
    }
    model.forecast(&series, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdditiveForecaster, BoxedForecaster};

    #[test]
    fn too_few_months_is_insufficient() {
        let records = vec![
            Record::new("2023-01-05", "50"),
            Record::new("2023-01-20", "70"),
            Record::new("bad", "1"),
        ];
        let model = AdditiveForecaster::default();
        assert_eq!(
            forecast_sales(&records, &model, 3).unwrap_err(),
            ForecastError::InsufficientData { needed: 2, got: 1 }
        );
    }

    #[test]
    fn works_through_a_boxed_model() {
        let records = vec![
            Record::new("2023-01-05", "50"),
            Record::new("2023-02-20", "70"),
        ];
        let model: BoxedForecaster = Box::new(AdditiveForecaster::default());
        let result = forecast_sales(&records, model.as_ref(), 1).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.history().count(), 2);
    }
}
