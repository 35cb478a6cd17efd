//! Configuration of the additive trend + seasonality forecaster.

use crate::error::{ForecastError, Result};

/// Default number of future months.
pub const DEFAULT_HORIZON: usize = 6;

/// Scaled noise variance used to turn prior scales into ridge penalties.
const PRIOR_NOISE_VARIANCE: f64 = 0.01;

/// Highest yearly Fourier order that monthly sampling can resolve.
pub const MAX_YEARLY_ORDER: usize = 6;

/// Whether the model includes a yearly seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearlySeasonality {
    /// Enabled when the history spans at least two years.
    #[default]
    Auto,
    Enabled,
    Disabled,
}

/// Tunable knobs of [`AdditiveForecaster`](super::AdditiveForecaster).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Maximum number of potential trend changepoints.
    pub n_changepoints: usize,
    /// Fraction of the history in which changepoints may be placed.
    pub changepoint_range: f64,
    /// Prior scale of trend rate changes; smaller is stiffer.
    pub changepoint_prior_scale: f64,
    /// Prior scale of the Fourier coefficients.
    pub seasonality_prior_scale: f64,
    pub yearly_seasonality: YearlySeasonality,
    /// Fourier order of the yearly component (1..=6).
    pub yearly_order: usize,
    /// Coverage of the uncertainty interval, in (0, 1).
    pub interval_width: f64,
    /// Monte Carlo draws used for the interval; 0 disables intervals.
    pub uncertainty_samples: usize,
    /// Seed of the interval simulation.
    pub seed: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            yearly_seasonality: YearlySeasonality::Auto,
            yearly_order: 3,
            interval_width: 0.8,
            uncertainty_samples: 1000,
            seed: 0,
        }
    }
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_changepoints(mut self, n: usize) -> Self {
        self.n_changepoints = n;
        self
    }

    pub fn with_changepoint_range(mut self, range: f64) -> Self {
        self.changepoint_range = range;
        self
    }

    pub fn with_changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.changepoint_prior_scale = scale;
        self
    }

    pub fn with_seasonality_prior_scale(mut self, scale: f64) -> Self {
        self.seasonality_prior_scale = scale;
        self
    }

    pub fn with_yearly_seasonality(mut self, mode: YearlySeasonality) -> Self {
        self.yearly_seasonality = mode;
        self
    }

    pub fn with_yearly_order(mut self, order: usize) -> Self {
        self.yearly_order = order;
        self
    }

    pub fn with_interval_width(mut self, width: f64) -> Self {
        self.interval_width = width;
        self
    }

    pub fn with_uncertainty_samples(mut self, samples: usize) -> Self {
        self.uncertainty_samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every knob; called before each fit.
    pub fn validate(&self) -> Result<()> {
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "changepoint_range must be in (0, 1], got {}",
                self.changepoint_range
            )));
        }
        if !(self.changepoint_prior_scale.is_finite() && self.changepoint_prior_scale > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "changepoint_prior_scale must be positive, got {}",
                self.changepoint_prior_scale
            )));
        }
        if !self.changepoint_penalty().is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "changepoint_prior_scale {} is too small to give a finite penalty",
                self.changepoint_prior_scale
            )));
        }
        if !(self.seasonality_prior_scale.is_finite() && self.seasonality_prior_scale > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonality_prior_scale must be positive, got {}",
                self.seasonality_prior_scale
            )));
        }
        if !self.seasonal_penalty().is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonality_prior_scale {} is too small to give a finite penalty",
                self.seasonality_prior_scale
            )));
        }
        if self.yearly_order == 0 || self.yearly_order > MAX_YEARLY_ORDER {
            return Err(ForecastError::InvalidParameter(format!(
                "yearly_order must be between 1 and {MAX_YEARLY_ORDER}, got {}",
                self.yearly_order
            )));
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "interval_width must be in (0, 1), got {}",
                self.interval_width
            )));
        }
        Ok(())
    }

    /// Ridge penalty on each trend rate change.
    pub(crate) fn changepoint_penalty(&self) -> f64 {
        PRIOR_NOISE_VARIANCE / self.changepoint_prior_scale.powi(2)
    }

    /// Ridge penalty on each Fourier coefficient.
    pub(crate) fn seasonal_penalty(&self) -> f64 {
        PRIOR_NOISE_VARIANCE / self.seasonality_prior_scale.powi(2)
    }

    /// Resolve the seasonality mode for a history spanning `span_months`.
    pub(crate) fn seasonality_enabled(&self, span_months: usize) -> bool {
        match self.yearly_seasonality {
            YearlySeasonality::Auto => span_months >= 24,
            YearlySeasonality::Enabled => true,
            YearlySeasonality::Disabled => false,
        }
    }
}
