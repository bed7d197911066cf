//! The encoded/decoded packet: index, degree, XOR'd payload, and (once it
//! has passed through graph recovery at the decoder) its neighbor set.
//!
//! A passive value type, grounded in `original_source/core.py::Symbol`
//! (`__slots__ = ["index", "degree", "data", "neighbors"]`, plus a `.log()`
//! debug helper that re-derives neighbors rather than storing them
//! permanently).

use crate::sampler::NeighborSampler;
use bytes::Bytes;
use std::collections::HashSet;

/// An LT-coded symbol.
///
/// `neighbors` is `None` until it has been through
/// [`crate::decoder::Decoder`]'s graph-recovery phase; an encoder-emitted
/// symbol never carries its neighbor set explicitly (spec §6: neighbors are
/// always reconstructible from `(index, degree, K)` and are never
/// transmitted).
#[derive(Debug, Clone)]
pub struct Symbol {
    pub index: u64,
    pub degree: usize,
    pub data: Bytes,
    pub neighbors: Option<HashSet<usize>>,
}

impl Symbol {
    /// Constructs a freshly encoded symbol (no neighbor set materialized).
    pub fn new(index: u64, degree: usize, data: Bytes) -> Self {
        Self {
            index,
            degree,
            data,
            neighbors: None,
        }
    }

    /// Re-derives this symbol's neighbors from `(index, degree, k)` without
    /// mutating it, purely for diagnostic logging — equivalent to invoking
    /// [`NeighborSampler`] directly.
    pub fn log(&self, sampler: &NeighborSampler, k: usize) {
        match sampler.sample(self.index, self.degree, k) {
            Ok((neighbors, degree)) => {
                log::trace!(
                    "symbol_{} degree={} neighbors={:?}",
                    self.index,
                    degree,
                    neighbors
                );
            }
            Err(e) => {
                log::trace!("symbol_{} degree={} neighbors=<{}>", self.index, self.degree, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_symbol_has_no_materialized_neighbors() {
        let s = Symbol::new(0, 1, Bytes::from_static(&[1, 2, 3]));
        assert!(s.neighbors.is_none());
    }
}
