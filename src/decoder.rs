//! Peeling / belief-propagation reconstructor.
//!
//! Grounded in `original_source/decoder.py` (`recover_graph`,
//! `reduce_neighbors`, `decode`) for the algorithm, and spec §9's design
//! note for the data structures: a stable-handle arena plus an inverted
//! index from block number to the symbols still waiting on it, processed
//! through a worklist rather than the original's in-place mutating scan.

use crate::config::Config;
use crate::error::{LtError, Result};
use crate::sampler::NeighborSampler;
use crate::symbol::Symbol;
use crate::xor::xor_into;
use std::collections::{HashSet, VecDeque};

pub type SourceBlock = Vec<u8>;

/// Result of a decode attempt. Success is `solved == blocks.len()`; a stall
/// (`solved < blocks.len()`) is a normal outcome, not an error — the caller
/// decides whether a partial result is acceptable.
#[derive(Debug)]
pub struct DecodeOutcome {
    pub blocks: Vec<Option<SourceBlock>>,
    pub solved: usize,
}

impl DecodeOutcome {
    pub fn is_complete(&self) -> bool {
        self.solved == self.blocks.len()
    }
}

/// A symbol still in play at the decoder: its current (already-reduced)
/// payload and the set of source blocks it still depends on.
struct ActiveSymbol {
    data: Vec<u8>,
    neighbors: HashSet<usize>,
}

/// Peeling decoder for a known `K`.
pub struct Decoder {
    k: usize,
    config: Config,
    sampler: NeighborSampler,
}

impl Decoder {
    pub fn new(k: usize, config: Config) -> Result<Self> {
        config.validate()?;
        if k < 1 {
            return Err(LtError::InvalidParameter(
                "decoder requires K >= 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            config,
            sampler: NeighborSampler::new(config.systematic),
        })
    }

    /// Ingests a multiset of symbols (order-independent on success, per
    /// spec §5) and peels degree-1 symbols until every block is solved or no
    /// further progress is possible.
    pub fn decode(&self, symbols: Vec<Symbol>) -> Result<DecodeOutcome> {
        if symbols.is_empty() {
            return Err(LtError::EmptyInput);
        }

        let k = self.k;
        let mut blocks: Vec<Option<SourceBlock>> = vec![None; k];
        let mut solved = 0usize;

        // Arena of symbols still in play, addressed by stable handle
        // (their position in this Vec). `None` means consumed or discarded.
        let mut arena: Vec<Option<ActiveSymbol>> = Vec::with_capacity(symbols.len());
        // block index -> handles of symbols that still list it as a neighbor.
        let mut block_deps: Vec<HashSet<usize>> = vec![HashSet::new(); k];
        let mut worklist: VecDeque<usize> = VecDeque::new();

        for symbol in symbols {
            let (neighbors, degree) = self.sampler.sample(symbol.index, symbol.degree, k)?;
            let handle = arena.len();
            for &j in &neighbors {
                block_deps[j].insert(handle);
            }
            arena.push(Some(ActiveSymbol {
                data: symbol.data.to_vec(),
                neighbors: neighbors.into_iter().collect(),
            }));
            if degree == 1 {
                worklist.push_back(handle);
            }
        }

        while let Some(handle) = worklist.pop_front() {
            let Some(active) = arena[handle].take() else {
                continue;
            };
            // A symbol queued while at degree 1 can have its last neighbor
            // stripped by `reduce` before it is popped, if some other
            // degree-1 symbol for the same block is processed first; that
            // leaves it with zero neighbors here, which is just another
            // shape of "redundant", alongside blocks[j] already being filled.
            let Some(&j) = active.neighbors.iter().next() else {
                log::trace!("discarding symbol already resolved via another path");
                continue;
            };

            if blocks[j].is_some() {
                // Redundant degree-1 symbol: another one already solved j.
                log::trace!("discarding redundant symbol for block {j}");
                continue;
            }

            log::debug!("solved block {j} ({}/{k})", solved + 1);
            blocks[j] = Some(active.data);
            solved += 1;

            self.reduce(j, &blocks, &mut arena, &mut block_deps, &mut worklist);

            if solved == k {
                break;
            }
        }

        Ok(DecodeOutcome { blocks, solved })
    }

    /// XORs the newly solved block `j` out of every symbol still waiting on
    /// it, queuing any that drop to degree 1.
    fn reduce(
        &self,
        j: usize,
        blocks: &[Option<SourceBlock>],
        arena: &mut [Option<ActiveSymbol>],
        block_deps: &mut [HashSet<usize>],
        worklist: &mut VecDeque<usize>,
    ) {
        let block_j = blocks[j].as_ref().expect("block just solved");
        let watchers = std::mem::take(&mut block_deps[j]);

        for handle in watchers {
            let Some(active) = arena[handle].as_mut() else {
                continue;
            };
            if !active.neighbors.remove(&j) {
                continue;
            }
            xor_into(&mut active.data, block_j, self.config.word_width);
            if active.neighbors.len() == 1 {
                worklist.push_back(handle);
            }
        }
    }
}
