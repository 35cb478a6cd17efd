//! Piecewise-linear trend basis.
//!
//! The trend is `offset + k * t + sum(delta_j * max(0, t - s_j))` where `t`
//! is time scaled to `[0, 1]` over the history and `s_j` are changepoints.

/// Indices of the observations used as potential changepoints.
///
/// Candidates are spread uniformly over the first `range` fraction of the
/// observations, never including the first one. Fewer than `n_changepoints`
/// come back when the history is short.
pub fn changepoint_indices(n_obs: usize, n_changepoints: usize, range: f64) -> Vec<usize> {
    let hist_size = (n_obs as f64 * range).floor() as usize;
    let n_changepoints = n_changepoints.min(hist_size.saturating_sub(1));
    if n_changepoints == 0 {
        return Vec::new();
    }

    let last = (hist_size - 1) as f64;
    let mut indices: Vec<usize> = (1..=n_changepoints)
        .map(|i| (i as f64 * last / n_changepoints as f64).round() as usize)
        .collect();
    indices.dedup();
    indices
}

/// Hinge features `max(0, t - s_j)` for each changepoint.
pub fn hinge_features(t: f64, changepoints: &[f64]) -> impl Iterator<Item = f64> + '_ {
    changepoints.iter().map(move |&s| (t - s).max(0.0))
}

/// Evaluate the trend at `t`.
pub fn evaluate(t: f64, offset: f64, growth: f64, changepoints: &[f64], deltas: &[f64]) -> f64 {
    offset
        + growth * t
        + hinge_features(t, changepoints)
            .zip(deltas.iter())
            .map(|(h, d)| h * d)
            .sum::<f64>()
}
