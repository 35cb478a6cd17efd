//! Numerical helpers for the forecasting models.

pub mod ols;
pub mod stats;

pub use ols::{ridge_fit, RidgeResult};
pub use stats::{mean_abs, quantile};
