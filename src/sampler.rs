//! Deterministic neighbor selection.
//!
//! `sample(seed, degree, k)` must be a pure function: encoder and decoder
//! reconstruct the identical neighbor set from the same `(seed, degree, k)`
//! triple without exchanging anything beyond those three numbers. Grounded
//! in `original_source/core.py::generate_indexes`, which seeds Python's
//! `random` module with the symbol index and calls `random.sample`; here
//! that becomes a fresh `StdRng::seed_from_u64(seed)` plus
//! `rand::seq::index::sample`, the reservoir/Fisher-Yates-without-replacement
//! procedure spec's design notes call for (see `DESIGN.md`, Open Question 1).

use crate::error::{LtError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Given a symbol index as seed and a target degree, deterministically
/// produces distinct block indices in `[0, K)`.
#[derive(Debug, Clone, Copy)]
pub struct NeighborSampler {
    systematic: bool,
}

impl NeighborSampler {
    pub fn new(systematic: bool) -> Self {
        Self { systematic }
    }

    /// Returns `(indices, effective_degree)`.
    ///
    /// When systematic mode is enabled and `seed < k`, overrides to a
    /// single-neighbor identity symbol regardless of the requested degree.
    /// Otherwise draws `degree` distinct indices from `[0, k)`, clamping a
    /// degree of `0` up to `1` (the source's own defensive note: degree `0`
    /// has probability zero under any well-formed distribution but would
    /// otherwise produce a neighborless, all-zero symbol).
    pub fn sample(&self, seed: u64, degree: usize, k: usize) -> Result<(Vec<usize>, usize)> {
        if k == 0 {
            return Err(LtError::InvalidParameter(
                "NeighborSampler requires K >= 1".to_string(),
            ));
        }

        if self.systematic && (seed as usize) < k {
            return Ok((vec![seed as usize], 1));
        }

        let degree = degree.max(1);
        if degree > k {
            return Err(LtError::InvalidParameter(format!(
                "degree {degree} exceeds block count {k}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let indices = rand::seq::index::sample(&mut rng, k, degree).into_vec();
        Ok((indices, degree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn systematic_override_ignores_requested_degree() {
        let sampler = NeighborSampler::new(true);
        let (indices, degree) = sampler.sample(3, 7, 10).unwrap();
        assert_eq!(indices, vec![3]);
        assert_eq!(degree, 1);
    }

    #[test]
    fn systematic_disabled_samples_normally() {
        let systematic = NeighborSampler::new(true);
        let plain = NeighborSampler::new(false);
        let (sys_indices, _) = systematic.sample(3, 1, 10).unwrap();
        let (plain_indices, plain_degree) = plain.sample(3, 1, 10).unwrap();
        assert_eq!(sys_indices, plain_indices);
        assert_eq!(plain_degree, 1);
    }

    #[test]
    fn deterministic_across_calls() {
        let sampler = NeighborSampler::new(false);
        let a = sampler.sample(42, 5, 100).unwrap();
        let b = sampler.sample(42, 5, 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn indices_are_distinct_and_in_range() {
        let sampler = NeighborSampler::new(false);
        let (indices, degree) = sampler.sample(99, 8, 20).unwrap();
        assert_eq!(indices.len(), degree);
        let unique: std::collections::HashSet<_> = indices.iter().collect();
        assert_eq!(unique.len(), indices.len());
        assert!(indices.iter().all(|&i| i < 20));
    }

    #[test]
    fn rejects_degree_greater_than_k() {
        let sampler = NeighborSampler::new(false);
        assert!(sampler.sample(1, 5, 3).is_err());
    }

    #[test]
    fn clamps_degree_zero_to_one() {
        let sampler = NeighborSampler::new(false);
        let (indices, degree) = sampler.sample(1, 0, 10).unwrap();
        assert_eq!(degree, 1);
        assert_eq!(indices.len(), 1);
    }
}
