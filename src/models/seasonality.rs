//! Fourier basis for the yearly seasonal component.

use crate::core::Period;
use std::f64::consts::PI;

/// Months per seasonal cycle.
pub const YEARLY_PERIOD: f64 = 12.0;

/// Number of basis columns for a given order.
///
/// At order 6 the sine term is zero at every whole month, so it is left out.
pub fn fourier_width(order: usize) -> usize {
    if order * 2 >= YEARLY_PERIOD as usize {
        2 * order - 1
    } else {
        2 * order
    }
}

/// Fourier features of a period, phased on the calendar month.
pub fn fourier_features(period: Period, order: usize) -> Vec<f64> {
    let position = period.month_of_year() as f64;
    let mut features = Vec::with_capacity(fourier_width(order));
    for k in 1..=order {
        let angle = 2.0 * PI * k as f64 * position / YEARLY_PERIOD;
        features.push(angle.cos());
        if 2 * k < YEARLY_PERIOD as usize {
            features.push(angle.sin());
        }
    }
    features
}
