//! Forecast result structures.

use crate::core::Period;
use serde::Serialize;

/// One row of a forecast table.
///
/// `predicted_value` is always `trend_component + seasonal_component`; for an
/// observed period the residual is `actual - predicted_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub period: Period,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub trend_component: f64,
    pub seasonal_component: f64,
    /// Observed value, when the period was part of the input.
    pub actual: Option<f64>,
    /// True for periods after the last observation.
    pub is_forecast: bool,
}

impl ForecastPoint {
    /// Observed minus fitted, for historical points.
    pub fn residual(&self) -> Option<f64> {
        self.actual.map(|a| a - self.predicted_value)
    }

    /// Width of the uncertainty interval.
    pub fn interval_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Read-only diagnostics of a fitted model.
///
/// The state is produced by a single fit and cannot be refitted or reused to
/// forecast another series.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    pub(crate) model: &'static str,
    pub(crate) changepoints: Vec<Period>,
    pub(crate) changepoint_deltas: Vec<f64>,
    pub(crate) base_growth: f64,
    pub(crate) offset: f64,
    pub(crate) y_scale: f64,
    pub(crate) sigma: f64,
    pub(crate) yearly_order: usize,
    pub(crate) interval_width: f64,
    pub(crate) seed: u64,
    pub(crate) n_observations: usize,
}

impl ModelState {
    /// Name of the model that produced this state.
    pub fn model(&self) -> &str {
        self.model
    }

    /// Periods at which the trend was allowed to change slope.
    pub fn changepoints(&self) -> &[Period] {
        &self.changepoints
    }

    /// Fitted rate change at each changepoint, in value units per month.
    pub fn changepoint_deltas(&self) -> &[f64] {
        &self.changepoint_deltas
    }

    /// Trend slope before the first changepoint, in value units per month.
    pub fn base_growth(&self) -> f64 {
        self.base_growth
    }

    /// Trend value at the first observed period.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Scale applied to the series before fitting.
    pub fn y_scale(&self) -> f64 {
        self.y_scale
    }

    /// Residual standard deviation, in value units.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Fourier order of the yearly seasonality (0 when disabled).
    pub fn yearly_order(&self) -> usize {
        self.yearly_order
    }

    pub fn has_seasonality(&self) -> bool {
        self.yearly_order > 0
    }

    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of observed periods the model was fitted on.
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }
}

/// Output of a forecast: the full table plus the fitted model state.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    pub model_state: ModelState,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points covering the observed range.
    pub fn history(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter().filter(|p| !p.is_forecast)
    }

    /// Points after the last observation.
    pub fn future(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter().filter(|p| p.is_forecast)
    }

    /// Number of future periods.
    pub fn horizon(&self) -> usize {
        self.future().count()
    }

    pub fn periods(&self) -> Vec<Period> {
        self.points.iter().map(|p| p.period).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_value).collect()
    }

    pub fn trend(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.trend_component).collect()
    }

    pub fn seasonal(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.seasonal_component).collect()
    }

    /// Residuals of the observed periods.
    pub fn residuals(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.residual()).collect()
    }

    pub fn get(&self, period: Period) -> Option<&ForecastPoint> {
        self.points.iter().find(|p| p.period == period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: u32, actual: Option<f64>, is_forecast: bool) -> ForecastPoint {
        ForecastPoint {
            period: Period::from_ymd(2023, month).unwrap(),
            predicted_value: 10.0,
            lower_bound: 8.0,
            upper_bound: 13.0,
            trend_component: 7.0,
            seasonal_component: 3.0,
            actual,
            is_forecast,
        }
    }

    fn state() -> ModelState {
        ModelState {
            model: "Additive",
            changepoints: vec![],
            changepoint_deltas: vec![],
            base_growth: 1.0,
            offset: 0.0,
            y_scale: 1.0,
            sigma: 0.5,
            yearly_order: 0,
            interval_width: 0.8,
            seed: 0,
            n_observations: 2,
        }
    }

    #[test]
    fn point_residual_and_width() {
        let p = point(1, Some(12.5), false);
        assert_eq!(p.residual(), Some(2.5));
        assert_eq!(p.interval_width(), 5.0);

        assert_eq!(point(4, None, true).residual(), None);
    }

    #[test]
    fn result_splits_history_and_future() {
        let result = ForecastResult {
            points: vec![
                point(1, Some(9.0), false),
                point(2, None, false),
                point(3, Some(11.0), false),
                point(4, None, true),
            ],
            model_state: state(),
        };

        assert_eq!(result.len(), 4);
        assert_eq!(result.history().count(), 3);
        assert_eq!(result.horizon(), 1);
        assert_eq!(result.residuals(), vec![-1.0, 1.0]);
        assert!(result.get(Period::from_ymd(2023, 4).unwrap()).is_some());
        assert!(!result.model_state.has_seasonality());
    }
}
