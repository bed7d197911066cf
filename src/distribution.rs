//! Ideal and Robust Soliton degree distributions.
//!
//! Formulas grounded in `original_source/distributions.py`
//! (`ideal_distribution`, `robust_distribution`), which this generalizes
//! only by parameterizing `δ` and the distribution family rather than
//! hard-coding them as module globals.

use crate::config::Distribution;
use crate::error::{LtError, Result};
use rand::Rng;
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution as _;

const NORMALIZATION_TOLERANCE: f64 = 1e-4;

/// Probability mass function over degrees `1..=K`, ready to sample from.
#[derive(Clone)]
pub struct DegreeDistribution {
    k: usize,
    /// `mu[d-1]` is the probability of drawing degree `d`.
    mu: Vec<f64>,
    weighted: WeightedIndex<f64>,
}

impl DegreeDistribution {
    /// Builds the Ideal or Robust Soliton PMF over `1..=k`.
    ///
    /// `failure_probability` (`δ`) only matters for `Distribution::Robust`
    /// and must lie in `(0, 1)`.
    pub fn new(k: usize, distribution: Distribution, failure_probability: f64) -> Result<Self> {
        if k < 1 {
            return Err(LtError::InvalidParameter(
                "DegreeDistribution requires K >= 1".to_string(),
            ));
        }

        let rho = ideal_soliton(k);
        let mu = match distribution {
            Distribution::Ideal => rho,
            Distribution::Robust => robust_soliton(k, failure_probability, &rho)?,
        };

        let sum: f64 = mu.iter().sum();
        if (sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(LtError::Unnormalized { sum });
        }

        let weighted = WeightedIndex::new(&mu).map_err(|e| {
            LtError::InvalidParameter(format!("degree distribution weights invalid: {e}"))
        })?;

        Ok(Self { k, mu, weighted })
    }

    /// Number of source blocks this distribution was built for.
    pub fn k(&self) -> usize {
        self.k
    }

    /// `p[d]`, the probability of degree `d`, for `d` in `1..=K`. Panics if
    /// `d` is out of range.
    pub fn probability(&self, d: usize) -> f64 {
        self.mu[d - 1]
    }

    /// Draws a single degree in `1..=K` using the supplied RNG.
    ///
    /// Callers own the RNG (and its seed) so that degree draws remain a pure
    /// function of whatever seed they choose — see
    /// `crate::encoder::Encoder`, which seeds one fresh RNG per symbol index
    /// to keep encoding embarrassingly parallel.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        self.weighted.sample(rng) + 1
    }
}

/// ρ(1) = 1/K, ρ(d) = 1/(d(d-1)) for d = 2..K.
fn ideal_soliton(k: usize) -> Vec<f64> {
    let mut rho = vec![0.0; k];
    rho[0] = 1.0 / k as f64;
    for d in 2..=k {
        rho[d - 1] = 1.0 / ((d * (d - 1)) as f64);
    }
    rho
}

/// μ(d) = (ρ(d) + τ(d)) / β, with the robust spike τ at M = K/2 + 1.
fn robust_soliton(k: usize, delta: f64, rho: &[f64]) -> Result<Vec<f64>> {
    if !(delta > 0.0 && delta < 1.0) {
        return Err(LtError::InvalidParameter(format!(
            "failure_probability must be in (0, 1) (got {delta})"
        )));
    }

    let m = k / 2 + 1;
    let r = k as f64 / m as f64;

    let mut tau = vec![0.0; k];
    for d in 1..m {
        tau[d - 1] = 1.0 / (d as f64 * m as f64);
    }
    if m <= k {
        tau[m - 1] = (r / delta).ln() / m as f64;
    }
    // tau[d] = 0 for d > m: already the vec's initial value.

    let beta: f64 = rho.iter().sum::<f64>() + tau.iter().sum::<f64>();

    let mu: Vec<f64> = rho
        .iter()
        .zip(tau.iter())
        .map(|(r, t)| (r + t) / beta)
        .collect();
    Ok(mu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_k_zero() {
        assert!(DegreeDistribution::new(0, Distribution::Robust, 0.01).is_err());
    }

    #[test]
    fn ideal_and_robust_normalize_across_k() {
        for &k in &[1usize, 2, 10, 100, 1000, 10_000] {
            let ideal = DegreeDistribution::new(k, Distribution::Ideal, 0.01).unwrap();
            let sum: f64 = (1..=k).map(|d| ideal.probability(d)).sum();
            assert!((sum - 1.0).abs() < 1e-4, "ideal k={k} sum={sum}");

            let robust = DegreeDistribution::new(k, Distribution::Robust, 0.01).unwrap();
            let sum: f64 = (1..=k).map(|d| robust.probability(d)).sum();
            assert!((sum - 1.0).abs() < 1e-4, "robust k={k} sum={sum}");
        }
    }

    #[test]
    fn sample_stays_in_range() {
        let dist = DegreeDistribution::new(50, Distribution::Robust, 0.01).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = dist.sample(&mut rng);
            assert!((1..=50).contains(&d));
        }
    }

    #[test]
    fn robust_rejects_bad_delta() {
        assert!(DegreeDistribution::new(10, Distribution::Robust, 0.0).is_err());
        assert!(DegreeDistribution::new(10, Distribution::Robust, 1.0).is_err());
    }
}
