//! Streaming producer of [`Symbol`]s from K source blocks.
//!
//! Grounded in `original_source/encoder.py::encode` for the algorithm shape
//! (draw a degree array, then per-symbol neighbor draw + XOR) and
//! `loic-fejoz-hqfbp-rs/src/codec/lt.rs::LTEncoder::encode` for the Rust XOR
//! accumulation loop.

use crate::config::Config;
use crate::distribution::DegreeDistribution;
use crate::error::{LtError, Result};
use crate::sampler::NeighborSampler;
use crate::symbol::Symbol;
use crate::xor::xor_into;
use bytes::Bytes;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::Arc;

pub type SourceBlock = Vec<u8>;

/// Produces an unbounded stream of [`Symbol`]s from a fixed set of source
/// blocks. Source blocks are borrowed read-only for the lifetime of the
/// encoder (shared via `Arc` so the lazy iterator it hands out can outlive
/// any particular call to [`Encoder::encode`]).
pub struct Encoder {
    blocks: Arc<Vec<SourceBlock>>,
    k: usize,
    config: Config,
    distribution: DegreeDistribution,
    sampler: NeighborSampler,
}

impl Encoder {
    /// Validates `blocks` (must be non-empty, uniform length equal to
    /// `config.packet_size`) and builds the degree distribution up front.
    pub fn new(blocks: Vec<SourceBlock>, config: Config) -> Result<Self> {
        config.validate()?;

        let k = blocks.len();
        if k < 1 {
            return Err(LtError::InvalidParameter(
                "encoder requires at least one source block".to_string(),
            ));
        }
        for (i, b) in blocks.iter().enumerate() {
            if b.len() != config.packet_size {
                return Err(LtError::InvalidParameter(format!(
                    "block {i} has length {}, expected packet_size {}",
                    b.len(),
                    config.packet_size
                )));
            }
        }

        let distribution = DegreeDistribution::new(k, config.distribution, config.failure_probability)?;
        let sampler = NeighborSampler::new(config.systematic);

        Ok(Self {
            blocks: Arc::new(blocks),
            k,
            config,
            distribution,
            sampler,
        })
    }

    /// Number of source blocks.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Produces a lazy sequence of `n` symbols (`n >= k`). The caller may
    /// consume as many or as few as desired; dropping the iterator requires
    /// no cleanup.
    pub fn encode(&self, n: u64) -> Result<SymbolStream> {
        if n < self.k as u64 {
            return Err(LtError::InvalidParameter(format!(
                "drops_quantity {n} must be >= K ({})",
                self.k
            )));
        }
        Ok(SymbolStream {
            blocks: Arc::clone(&self.blocks),
            k: self.k,
            word_width: self.config.word_width,
            distribution: Arc::new(self.distribution.clone()),
            sampler: self.sampler,
            cursor: 0,
            n,
        })
    }

    /// Computes a batch of symbols for `range` in parallel via `rayon`,
    /// grounded in spec §5's note that "encoding of distinct symbols is
    /// embarrassingly parallel". Each symbol only needs its own index, so no
    /// shared mutable state crosses worker threads.
    pub fn encode_batch(&self, range: std::ops::Range<u64>) -> Vec<Symbol> {
        let blocks = &self.blocks;
        let k = self.k;
        let word_width = self.config.word_width;
        let distribution = &self.distribution;
        let sampler = self.sampler;

        range
            .into_par_iter()
            .map(|i| build_symbol(i, blocks, k, word_width, distribution, &sampler))
            .collect()
    }
}

/// Lazy, external-iterator-style symbol producer. Holds `(blocks, cursor)`
/// plus everything needed to regenerate a symbol on demand, per spec §9's
/// design note on lazy symbol emission.
pub struct SymbolStream {
    blocks: Arc<Vec<SourceBlock>>,
    k: usize,
    word_width: crate::config::WordWidth,
    distribution: Arc<DegreeDistribution>,
    sampler: NeighborSampler,
    cursor: u64,
    n: u64,
}

impl Iterator for SymbolStream {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if self.cursor >= self.n {
            return None;
        }
        let i = self.cursor;
        self.cursor += 1;
        Some(build_symbol(
            i,
            &self.blocks,
            self.k,
            self.word_width,
            &self.distribution,
            &self.sampler,
        ))
    }
}

/// Builds symbol `i`: draw its degree (symbol 0 is always degree 1, per
/// spec's decoder-bootstrap invariant), sample its neighbors, XOR the
/// selected blocks together.
fn build_symbol(
    i: u64,
    blocks: &[SourceBlock],
    k: usize,
    word_width: crate::config::WordWidth,
    distribution: &DegreeDistribution,
    sampler: &NeighborSampler,
) -> Symbol {
    let degree = if i == 0 {
        1
    } else {
        let mut degree_rng = StdRng::seed_from_u64(i);
        distribution.sample(&mut degree_rng)
    };

    // `sample` is infallible here: degree is always in [1, k] by
    // construction and k matches what the encoder validated at build time.
    let (indices, degree) = sampler
        .sample(i, degree, k)
        .expect("degree and k are always valid for a symbol drawn from this encoder's own distribution");

    let mut data = blocks[indices[0]].clone();
    for &idx in &indices[1..] {
        xor_into(&mut data, &blocks[idx], word_width);
    }

    Symbol::new(i, degree, Bytes::from(data))
}
