//! Additive trend + yearly seasonality forecaster.
//!
//! The series is modelled as `trend(t) + seasonal(t) + noise` where the trend
//! is piecewise linear with regularized slope changes and the seasonal part is
//! a Fourier series over the calendar year. Coefficients are fitted jointly by
//! penalized least squares on the observed months only, so a missing month is
//! a missing row rather than a zero.

use crate::core::{ForecastPoint, ForecastResult, ModelState, MonthlySeries, Period};
use crate::error::{ForecastError, Result};
use crate::models::config::ForecastConfig;
use crate::models::uncertainty::Simulation;
use crate::models::{seasonality, trend, Forecaster};
use crate::utils::ols::ridge_fit;
use crate::utils::stats::mean_abs;
use tracing::debug;

/// Fewest distinct periods from which a trend can be estimated.
pub const MIN_PERIODS: usize = 2;

/// Floor of the simulated rate-change scale.
const MIN_DELTA_SCALE: f64 = 1e-8;

/// Additive forecaster with a piecewise-linear trend and yearly seasonality.
///
/// # Example
///
/// ```
/// use retail_forecast::core::{MonthlySeries, Period};
/// use retail_forecast::models::{AdditiveForecaster, Forecaster};
///
/// let start = Period::from_ymd(2023, 1).unwrap();
/// let series = MonthlySeries::from_values(start, vec![100.0, 120.0, 90.0, 130.0]).unwrap();
///
/// let result = AdditiveForecaster::default().forecast(&series, 2).unwrap();
/// assert_eq!(result.len(), 6);
/// assert_eq!(result.horizon(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdditiveForecaster {
    config: ForecastConfig,
}

impl AdditiveForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }
}

impl Forecaster for AdditiveForecaster {
    fn forecast(&self, series: &MonthlySeries, horizon: usize) -> Result<ForecastResult> {
        if series.len() < MIN_PERIODS {
            return Err(ForecastError::InsufficientData {
                needed: MIN_PERIODS,
                got: series.len(),
            });
        }
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { horizon });
        }
        self.config.validate()?;

        let model = FittedModel::fit(series, &self.config)?;
        model.predict(series, horizon, &self.config)
    }

    fn name(&self) -> &str {
        "Additive"
    }
}

/// Forecast with the default configuration.
///
/// # Example
///
/// ```
/// use retail_forecast::core::{MonthlySeries, Period};
/// use retail_forecast::{forecast, ForecastError};
///
/// let start = Period::from_ymd(2023, 1).unwrap();
/// let single = MonthlySeries::from_values(start, vec![100.0]).unwrap();
/// assert!(matches!(
///     forecast(&single, 3),
///     Err(ForecastError::InsufficientData { needed: 2, got: 1 })
/// ));
/// ```
pub fn forecast(series: &MonthlySeries, horizon: usize) -> Result<ForecastResult> {
    AdditiveForecaster::default().forecast(series, horizon)
}

/// Single-use fit state. Everything is in scaled units unless noted.
struct FittedModel {
    first: Period,
    span: f64,
    y_scale: f64,
    changepoints: Vec<f64>,
    changepoint_periods: Vec<Period>,
    order: usize,
    coefficients: Vec<f64>,
    sigma: f64,
}

impl FittedModel {
    fn fit(series: &MonthlySeries, config: &ForecastConfig) -> Result<Self> {
        let points = series.points();
        let n = points.len();
        let first = points[0].period;
        let span_months = series.span_months();
        let span = span_months as f64;

        let y_scale = match points.iter().map(|p| p.value.abs()).fold(0.0, f64::max) {
            s if s > 0.0 => s,
            _ => 1.0,
        };
        let ys: Vec<f64> = points.iter().map(|p| p.value / y_scale).collect();
        let ts: Vec<f64> = points
            .iter()
            .map(|p| first.months_until(&p.period) as f64 / span)
            .collect();

        let cp_indices =
            trend::changepoint_indices(n, config.n_changepoints, config.changepoint_range);
        let changepoints: Vec<f64> = cp_indices.iter().map(|&i| ts[i]).collect();
        let changepoint_periods: Vec<Period> =
            cp_indices.iter().map(|&i| points[i].period).collect();

        let order = if config.seasonality_enabled(span_months) {
            config.yearly_order
        } else {
            0
        };

        let mut model = Self {
            first,
            span,
            y_scale,
            changepoints,
            changepoint_periods,
            order,
            coefficients: Vec::new(),
            sigma: 0.0,
        };

        let rows: Vec<Vec<f64>> = points
            .iter()
            .zip(ts.iter())
            .map(|(p, &t)| model.design_row(t, p.period))
            .collect();

        let mut penalties = vec![0.0, 0.0];
        penalties.extend(vec![config.changepoint_penalty(); model.changepoints.len()]);
        penalties.extend(vec![config.seasonal_penalty(); seasonality::fourier_width(order)]);

        let ridge = ridge_fit(&rows, &ys, &penalties)?;
        let fitted = ridge.predict(&rows);
        model.coefficients = ridge.coefficients;

        let sse: f64 = ys.iter().zip(fitted.iter()).map(|(y, f)| (y - f).powi(2)).sum();
        model.sigma = (sse / n as f64).sqrt();
        if !model.sigma.is_finite() {
            return Err(ForecastError::ModelFit(format!(
                "residual scale is not finite after fitting {n} periods"
            )));
        }

        debug!(
            periods = n,
            span_months,
            changepoints = model.changepoints.len(),
            yearly_order = order,
            sigma = model.sigma * y_scale,
            "fitted additive model"
        );

        Ok(model)
    }

    fn design_row(&self, t: f64, period: Period) -> Vec<f64> {
        let mut row = vec![1.0, t];
        row.extend(trend::hinge_features(t, &self.changepoints));
        if self.order > 0 {
            row.extend(seasonality::fourier_features(period, self.order));
        }
        row
    }

    fn scaled_time(&self, period: Period) -> f64 {
        self.first.months_until(&period) as f64 / self.span
    }

    fn deltas(&self) -> &[f64] {
        &self.coefficients[2..2 + self.changepoints.len()]
    }

    /// Trend and seasonal components at `period`, in scaled units.
    fn components(&self, period: Period) -> (f64, f64) {
        let t = self.scaled_time(period);
        let level = trend::evaluate(
            t,
            self.coefficients[0],
            self.coefficients[1],
            &self.changepoints,
            self.deltas(),
        );
        let seasonal = if self.order > 0 {
            let start = 2 + self.changepoints.len();
            seasonality::fourier_features(period, self.order)
                .iter()
                .zip(self.coefficients[start..].iter())
                .map(|(f, b)| f * b)
                .sum::<f64>()
        } else {
            0.0
        };
        (level, seasonal)
    }

    fn predict(
        &self,
        series: &MonthlySeries,
        horizon: usize,
        config: &ForecastConfig,
    ) -> Result<ForecastResult> {
        let last = series
            .last_period()
            .ok_or(ForecastError::InsufficientData {
                needed: MIN_PERIODS,
                got: 0,
            })?;
        let end = i64::try_from(horizon)
            .ok()
            .and_then(|months| last.offset(months))
            .ok_or(ForecastError::InvalidHorizon { horizon })?;

        let periods: Vec<Period> = self.first.range_inclusive(end).collect();
        let ts: Vec<f64> = periods.iter().map(|p| self.scaled_time(*p)).collect();
        let components: Vec<(f64, f64)> = periods.iter().map(|p| self.components(*p)).collect();
        let center: Vec<f64> = components.iter().map(|(tr, se)| tr + se).collect();

        let simulation = Simulation {
            changepoint_rate: self.changepoints.len() as f64,
            delta_scale: mean_abs(self.deltas()) + MIN_DELTA_SCALE,
            sigma: self.sigma,
            samples: config.uncertainty_samples,
            interval_width: config.interval_width,
            seed: config.seed,
        };
        let (lower, upper) = simulation.bounds(&ts, &center)?;

        let points: Vec<ForecastPoint> = periods
            .iter()
            .enumerate()
            .map(|(i, &period)| {
                let (tr, se) = components[i];
                let trend_component = tr * self.y_scale;
                let seasonal_component = se * self.y_scale;
                ForecastPoint {
                    period,
                    predicted_value: trend_component + seasonal_component,
                    lower_bound: lower[i] * self.y_scale,
                    upper_bound: upper[i] * self.y_scale,
                    trend_component,
                    seasonal_component,
                    actual: series.get(period),
                    is_forecast: period > last,
                }
            })
            .collect();

        if points.iter().any(|p| !p.predicted_value.is_finite()) {
            return Err(ForecastError::ModelFit(
                "forecast contains non-finite values".into(),
            ));
        }

        let per_month = self.y_scale / self.span;
        let model_state = ModelState {
            model: "Additive",
            changepoints: self.changepoint_periods.clone(),
            changepoint_deltas: self.deltas().iter().map(|d| d * per_month).collect(),
            base_growth: self.coefficients[1] * per_month,
            offset: self.coefficients[0] * self.y_scale,
            y_scale: self.y_scale,
            sigma: self.sigma * self.y_scale,
            yearly_order: self.order,
            interval_width: config.interval_width,
            seed: config.seed,
            n_observations: series.len(),
        };

        Ok(ForecastResult {
            points,
            model_state,
        })
    }
}
