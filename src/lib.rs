//! LT (Luby Transform) rateless erasure codec.
//!
//! Turns `K` equal-size source blocks into an unbounded stream of encoded
//! symbols ([`encoder::Encoder`]) and recovers all `K` blocks from any
//! sufficiently large subset of received symbols via iterative
//! belief-propagation peeling ([`decoder::Decoder`]).
//!
//! File chunking, channel simulation, and wire framing are deliberately left
//! to callers — see `src/bin/ltcodec.rs` for a minimal example wrapper.

pub mod config;
pub mod decoder;
pub mod distribution;
pub mod encoder;
pub mod error;
pub mod sampler;
pub mod symbol;
pub mod xor;

pub use config::{Config, Distribution, WordWidth};
pub use decoder::{DecodeOutcome, Decoder};
pub use distribution::DegreeDistribution;
pub use encoder::{Encoder, SymbolStream};
pub use error::{LtError, Result};
pub use sampler::NeighborSampler;
pub use symbol::Symbol;
