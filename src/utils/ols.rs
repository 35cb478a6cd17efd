//! Penalized least squares used by the additive forecaster.
//!
//! Solves `(X'X + diag(penalty)) beta = X'y` with a Cholesky decomposition.
//! A zero penalty leaves a coefficient unregularized.

use crate::error::{ForecastError, Result};

/// Jitter added to the diagonal of the normal equations.
const DIAGONAL_JITTER: f64 = 1e-8;

/// Coefficients of a ridge regression, one per design column.
#[derive(Debug, Clone)]
pub struct RidgeResult {
    pub coefficients: Vec<f64>,
}

impl RidgeResult {
    /// Linear prediction for a single design row.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(row.iter())
            .map(|(b, x)| b * x)
            .sum()
    }

    /// Linear predictions for a row-major design matrix.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Fit `y = X beta` minimizing `||y - X beta||^2 + sum(penalty_j * beta_j^2)`.
///
/// # Arguments
/// * `rows` - Design matrix, one row per observation
/// * `y` - Target values (one per row)
/// * `penalties` - Non-negative penalty per column
pub fn ridge_fit(rows: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<RidgeResult> {
    let n = y.len();
    if n == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if rows.len() != n {
        return Err(ForecastError::ModelFit(format!(
            "design has {} rows for {} observations",
            rows.len(),
            n
        )));
    }

    let k = penalties.len();
    if let Some(row) = rows.iter().find(|r| r.len() != k) {
        return Err(ForecastError::ModelFit(format!(
            "design row has {} columns, expected {}",
            row.len(),
            k
        )));
    }
    if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(ForecastError::InvalidParameter(
            "ridge penalties must be finite and non-negative".into(),
        ));
    }

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];

    for (row, &y_obs) in rows.iter().zip(y.iter()) {
        for i in 0..k {
            let xi = row[i];
            if xi == 0.0 {
                continue;
            }
            xty[i] += xi * y_obs;
            for j in 0..=i {
                xtx[i][j] += xi * row[j];
            }
        }
    }

    for i in 0..k {
        for j in 0..i {
            xtx[j][i] = xtx[i][j];
        }
        xtx[i][i] += penalties[i] + DIAGONAL_JITTER;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::ModelFit(format!(
            "normal equations are not positive definite ({n} observations, {k} parameters)"
        ))
    })?;

    if beta.iter().any(|b| !b.is_finite()) {
        return Err(ForecastError::ModelFit(
            "least squares produced non-finite coefficients".into(),
        ));
    }

    Ok(RidgeResult { coefficients: beta })
}

/// Solve symmetric positive definite system using Cholesky decomposition.
///
/// Solves A @ x = b where A is symmetric positive definite.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L @ L'
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
