//! Monthly time series of aggregated sales.

use crate::core::Period;
use crate::error::{ForecastError, Result};
use serde::Serialize;

/// One month of aggregated sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub period: Period,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(period: Period, value: f64) -> Self {
        Self { period, value }
    }
}

/// A univariate monthly series with strictly increasing periods.
///
/// Gaps are allowed: a month without observations is simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    points: Vec<TimeSeriesPoint>,
}

impl MonthlySeries {
    /// Create a series, validating ordering and finiteness.
    pub fn new(points: Vec<TimeSeriesPoint>) -> Result<Self> {
        for i in 1..points.len() {
            if points[i].period <= points[i - 1].period {
                return Err(ForecastError::InvalidSeries(format!(
                    "periods must be strictly increasing ({} follows {})",
                    points[i].period,
                    points[i - 1].period
                )));
            }
        }

        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(ForecastError::InvalidSeries(format!(
                "non-finite value {} at {}",
                bad.value, bad.period
            )));
        }

        Ok(Self { points })
    }

    /// Create a contiguous series starting at `start`.
    pub fn from_values(start: Period, values: Vec<f64>) -> Result<Self> {
        let mut points = Vec::with_capacity(values.len());
        for (i, value) in values.into_iter().enumerate() {
            let period = start.offset(i as i64).ok_or_else(|| {
                ForecastError::InvalidSeries(format!("period {start} + {i} months is out of range"))
            })?;
            points.push(TimeSeriesPoint::new(period, value));
        }
        Self::new(points)
    }

    /// Number of observed periods.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TimeSeriesPoint> {
        self.points
    }

    pub fn periods(&self) -> Vec<Period> {
        self.points.iter().map(|p| p.period).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first_period(&self) -> Option<Period> {
        self.points.first().map(|p| p.period)
    }

    pub fn last_period(&self) -> Option<Period> {
        self.points.last().map(|p| p.period)
    }

    /// Value observed at `period`, if any.
    pub fn get(&self, period: Period) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.period.cmp(&period))
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Months between the first and last period (0 for a single point).
    pub fn span_months(&self) -> usize {
        match (self.first_period(), self.last_period()) {
            (Some(first), Some(last)) => first.months_until(&last) as usize,
            _ => 0,
        }
    }

    /// True when no month between the first and last period is missing.
    pub fn is_contiguous(&self) -> bool {
        self.points.is_empty() || self.span_months() + 1 == self.points.len()
    }

    /// Months inside the observed range that have no observation.
    pub fn missing_periods(&self) -> Vec<Period> {
        match (self.first_period(), self.last_period()) {
            (Some(first), Some(last)) => first
                .range_inclusive(last)
                .filter(|p| self.get(*p).is_none())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Copy of the series with every gap month filled with `fill`.
    pub fn zero_filled(&self) -> Self {
        self.filled_with(0.0)
    }

    /// Copy of the series with every gap month set to `fill`.
    pub fn filled_with(&self, fill: f64) -> Self {
        let points = match (self.first_period(), self.last_period()) {
            (Some(first), Some(last)) => first
                .range_inclusive(last)
                .map(|p| TimeSeriesPoint::new(p, self.get(p).unwrap_or(fill)))
                .collect(),
            _ => Vec::new(),
        };
        Self { points }
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> Period {
        Period::from_ymd(year, month).unwrap()
    }

    #[test]
    fn rejects_unordered_periods() {
        let points = vec![
            TimeSeriesPoint::new(ym(2023, 2), 1.0),
            TimeSeriesPoint::new(ym(2023, 1), 2.0),
        ];
        assert!(matches!(
            MonthlySeries::new(points),
            Err(ForecastError::InvalidSeries(_))
        ));
    }

    #[test]
    fn rejects_duplicate_periods() {
        let points = vec![
            TimeSeriesPoint::new(ym(2023, 1), 1.0),
            TimeSeriesPoint::new(ym(2023, 1), 2.0),
        ];
        assert!(MonthlySeries::new(points).is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let points = vec![TimeSeriesPoint::new(ym(2023, 1), f64::NAN)];
        assert!(MonthlySeries::new(points).is_err());
    }

    #[test]
    fn from_values_is_contiguous() {
        let series = MonthlySeries::from_values(ym(2023, 11), vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_period(), Some(ym(2024, 1)));
        assert!(series.is_contiguous());
        assert_eq!(series.span_months(), 2);
    }

    #[test]
    fn reports_and_fills_gaps() {
        let series = MonthlySeries::new(vec![
            TimeSeriesPoint::new(ym(2023, 1), 10.0),
            TimeSeriesPoint::new(ym(2023, 4), 40.0),
        ])
        .unwrap();

        assert!(!series.is_contiguous());
        assert_eq!(series.missing_periods(), vec![ym(2023, 2), ym(2023, 3)]);

        let filled = series.zero_filled();
        assert_eq!(filled.len(), 4);
        assert_eq!(filled.values(), vec![10.0, 0.0, 0.0, 40.0]);
        assert_eq!(filled.total(), series.total());
    }

    #[test]
    fn get_looks_up_by_period() {
        let series = MonthlySeries::from_values(ym(2023, 1), vec![5.0, 6.0]).unwrap();
        assert_eq!(series.get(ym(2023, 2)), Some(6.0));
        assert_eq!(series.get(ym(2023, 3)), None);
    }

    #[test]
    fn empty_series_has_no_span() {
        let series = MonthlySeries::default();
        assert!(series.is_empty());
        assert_eq!(series.span_months(), 0);
        assert!(series.missing_periods().is_empty());
        assert!(series.is_contiguous());
    }
}
