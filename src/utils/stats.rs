//! Statistical utility functions.

/// Mean of absolute values; 0 for an empty slice.
pub fn mean_abs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// `q` is clamped to `[0, 1]`. Non-finite samples are ignored; returns NaN
/// when nothing is left.
///
/// # Example
/// ```
/// use retail_forecast::utils::stats::quantile;
///
/// let q = quantile(&[4.0, 1.0, 3.0, 2.0, 5.0], 0.5);
/// assert!((q - 3.0).abs() < 1e-12);
/// ```
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    quantile_sorted(&sorted, q)
}

/// Same as [`quantile`] for input that is already sorted and finite.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_abs_ignores_sign() {
        assert_relative_eq!(mean_abs(&[-1.0, 2.0, -3.0]), 2.0, epsilon = 1e-12);
        assert_eq!(mean_abs(&[]), 0.0);
    }

    #[test]
    fn quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 1.0), 4.0, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 0.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 0.1), 1.3, epsilon = 1e-12);
    }

    #[test]
    fn quantile_skips_non_finite() {
        assert_relative_eq!(
            quantile(&[f64::NAN, 1.0, 3.0, f64::INFINITY], 0.5),
            2.0,
            epsilon = 1e-12
        );
        assert!(quantile(&[f64::NAN], 0.5).is_nan());
        assert!(quantile(&[], 0.5).is_nan());
    }
}
