//! Monte Carlo uncertainty intervals.
//!
//! Each draw extends the fitted trend with random future rate changes and
//! adds Gaussian observation noise. Rate changes arrive at the frequency the
//! history allowed changepoints, with Laplace-distributed magnitudes scaled
//! to the mean absolute fitted change. Historical points only carry noise, so
//! interval width grows with distance from the last observation.

use crate::error::{ForecastError, Result};
use crate::utils::stats::quantile_sorted;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{Laplace, Normal};

/// Parameters of the interval simulation, all in scaled units.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Expected number of rate changes per unit of scaled time.
    pub changepoint_rate: f64,
    /// Laplace scale of a simulated rate change.
    pub delta_scale: f64,
    /// Standard deviation of the observation noise.
    pub sigma: f64,
    pub samples: usize,
    pub interval_width: f64,
    pub seed: u64,
}

impl Simulation {
    /// Lower and upper bounds for each point.
    ///
    /// `ts` is the scaled time of each point in ascending order, with the last
    /// observation at 1.0; `center` is the fitted value at each point.
    pub fn bounds(&self, ts: &[f64], center: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        if ts.len() != center.len() {
            return Err(ForecastError::ModelFit(format!(
                "{} time points for {} fitted values",
                ts.len(),
                center.len()
            )));
        }
        if self.samples == 0 {
            return Ok((center.to_vec(), center.to_vec()));
        }

        let rate_change = Laplace::new(0.0, self.delta_scale)
            .map_err(|e| ForecastError::ModelFit(format!("rate change distribution: {e}")))?;
        let noise = if self.sigma > 0.0 {
            Some(
                Normal::new(0.0, self.sigma)
                    .map_err(|e| ForecastError::ModelFit(format!("noise distribution: {e}")))?,
            )
        } else {
            None
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut draws: Vec<Vec<f64>> = vec![Vec::with_capacity(self.samples); ts.len()];

        for _ in 0..self.samples {
            // Accumulated extra slope and its intercept correction.
            let mut slope = 0.0;
            let mut shift = 0.0;
            let mut prev_t = 1.0_f64;

            for (i, (&t, &c)) in ts.iter().zip(center.iter()).enumerate() {
                if t > prev_t {
                    let p = (self.changepoint_rate * (t - prev_t)).min(1.0);
                    if p > 0.0 && rng.gen::<f64>() < p {
                        let s = rng.gen_range(prev_t..t);
                        let delta = rate_change.sample(&mut rng);
                        slope += delta;
                        shift += delta * s;
                    }
                    prev_t = t;
                }

                let mut value = c + slope * t - shift;
                if let Some(noise) = &noise {
                    value += noise.sample(&mut rng);
                }
                draws[i].push(value);
            }
        }

        let lower_q = (1.0 - self.interval_width) / 2.0;
        let upper_q = 1.0 - lower_q;
        let mut lower = Vec::with_capacity(ts.len());
        let mut upper = Vec::with_capacity(ts.len());

        for mut samples in draws {
            samples.retain(|v| v.is_finite());
            if samples.is_empty() {
                return Err(ForecastError::ModelFit(
                    "interval simulation produced no finite draws".into(),
                ));
            }
            samples.sort_by(|a, b| a.total_cmp(b));
            lower.push(quantile_sorted(&samples, lower_q));
            upper.push(quantile_sorted(&samples, upper_q));
        }

        Ok((lower, upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> Simulation {
        Simulation {
            changepoint_rate: 8.0,
            delta_scale: 0.05,
            sigma: 0.02,
            samples: 500,
            interval_width: 0.8,
            seed: 42,
        }
    }

    fn grid(n_hist: usize, n_future: usize) -> Vec<f64> {
        let span = (n_hist - 1) as f64;
        (0..n_hist + n_future).map(|i| i as f64 / span).collect()
    }

    #[test]
    fn bounds_bracket_the_center() {
        let ts = grid(12, 6);
        let center: Vec<f64> = ts.iter().map(|t| 1.0 + 0.5 * t).collect();
        let (lower, upper) = simulation().bounds(&ts, &center).unwrap();

        for i in 0..ts.len() {
            assert!(lower[i] < center[i], "lower above center at {i}");
            assert!(upper[i] > center[i], "upper below center at {i}");
        }
    }

    #[test]
    fn future_intervals_widen() {
        let ts = grid(12, 12);
        let center = vec![1.0; ts.len()];
        let (lower, upper) = simulation().bounds(&ts, &center).unwrap();

        let width = |i: usize| upper[i] - lower[i];
        assert!(width(23) > width(11));
        assert!(width(23) > width(12));
    }

    #[test]
    fn same_seed_same_bounds() {
        let ts = grid(6, 3);
        let center = vec![2.0; ts.len()];
        let a = simulation().bounds(&ts, &center).unwrap();
        let b = simulation().bounds(&ts, &center).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_samples_collapse_to_center() {
        let ts = grid(4, 2);
        let center = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sim = Simulation {
            samples: 0,
            ..simulation()
        };
        let (lower, upper) = sim.bounds(&ts, &center).unwrap();
        assert_eq!(lower, center);
        assert_eq!(upper, center);
    }

    #[test]
    fn no_noise_and_no_changes_is_degenerate() {
        let ts = grid(3, 2);
        let center = vec![1.0; ts.len()];
        let sim = Simulation {
            changepoint_rate: 0.0,
            sigma: 0.0,
            ..simulation()
        };
        let (lower, upper) = sim.bounds(&ts, &center).unwrap();
        assert_eq!(lower, center);
        assert_eq!(upper, center);
    }

    #[test]
    fn rate_change_draws_match_the_scale() {
        let scale = 0.3;
        let dist = Laplace::new(0.0, scale).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let draws: Vec<f64> = (0..20_000).map(|_| dist.sample(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let mean_abs = draws.iter().map(|d| d.abs()).sum::<f64>() / draws.len() as f64;
        assert!(mean.abs() < 0.02);
        // E|X| equals the scale for a Laplace distribution.
        assert!((mean_abs - scale).abs() < 0.02);
    }

    #[test]
    fn non_positive_rate_change_scale_fails() {
        let ts = grid(4, 2);
        let center = vec![1.0; ts.len()];
        let sim = Simulation {
            delta_scale: 0.0,
            ..simulation()
        };
        assert!(matches!(
            sim.bounds(&ts, &center),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn mismatched_lengths_fail() {
        assert!(simulation().bounds(&[0.0, 1.0], &[1.0]).is_err());
    }
}
