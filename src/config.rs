//! Immutable codec configuration.
//!
//! The original Python implementation (`original_source/core.py`) kept
//! `SYSTEMATIC`, `VERBOSE`, and `PACKET_SIZE` as process-wide module globals.
//! This crate replaces them with one explicit, immutable value handed to the
//! [`crate::encoder::Encoder`] and [`crate::decoder::Decoder`] at
//! construction time. No global state.

use crate::error::{LtError, Result};

/// XOR accumulation granularity. Affects throughput only, never semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordWidth {
    Bytes1,
    Bytes2,
    Bytes4,
    Bytes8,
}

impl WordWidth {
    fn size(self) -> usize {
        match self {
            WordWidth::Bytes1 => 1,
            WordWidth::Bytes2 => 2,
            WordWidth::Bytes4 => 4,
            WordWidth::Bytes8 => 8,
        }
    }
}

impl TryFrom<usize> for WordWidth {
    type Error = LtError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            1 => Ok(WordWidth::Bytes1),
            2 => Ok(WordWidth::Bytes2),
            4 => Ok(WordWidth::Bytes4),
            8 => Ok(WordWidth::Bytes8),
            other => Err(LtError::InvalidParameter(format!(
                "word width must be one of 1, 2, 4, 8 bytes (got {other})"
            ))),
        }
    }
}

/// Degree distribution family. See [`crate::distribution::DegreeDistribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Ideal,
    Robust,
}

impl Default for Distribution {
    fn default() -> Self {
        Distribution::Robust
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Bytes per source/encoded block.
    pub packet_size: usize,
    /// XOR accumulation granularity.
    pub word_width: WordWidth,
    /// When set, symbols with `index < K` are identity copies of the source block.
    pub systematic: bool,
    /// Robust Soliton allowed failure probability (`δ`). Default `0.01`.
    pub failure_probability: f64,
    /// Degree distribution family. Default `Robust`.
    pub distribution: Distribution,
    /// Caller-side convenience ratio `N / K` for [`Config::drop_count`].
    pub redundancy: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packet_size: 65536,
            word_width: WordWidth::Bytes8,
            systematic: false,
            failure_probability: 0.01,
            distribution: Distribution::Robust,
            redundancy: 2.0,
        }
    }
}

impl Config {
    /// Validates the `InvalidParameter` conditions of the configuration
    /// surface (spec §7): packet size, word width divisibility, δ range,
    /// and redundancy.
    pub fn validate(&self) -> Result<()> {
        if self.packet_size == 0 {
            return Err(LtError::InvalidParameter(
                "packet_size must be positive".to_string(),
            ));
        }
        if !self.packet_size.is_multiple_of(self.word_width.size()) {
            return Err(LtError::InvalidParameter(format!(
                "word_width ({:?}) must evenly divide packet_size ({})",
                self.word_width, self.packet_size
            )));
        }
        if !(self.failure_probability > 0.0 && self.failure_probability < 1.0) {
            return Err(LtError::InvalidParameter(format!(
                "failure_probability must be in (0, 1) (got {})",
                self.failure_probability
            )));
        }
        if self.redundancy < 1.0 {
            return Err(LtError::InvalidParameter(format!(
                "redundancy must be >= 1.0 (got {})",
                self.redundancy
            )));
        }
        Ok(())
    }

    /// `N = ceil(K * redundancy)`, the caller-side convenience for picking a
    /// drop count (spec §6).
    pub fn drop_count(&self, k: usize) -> u64 {
        (k as f64 * self.redundancy).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_packet_size() {
        let cfg = Config {
            packet_size: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_word_width_not_dividing_packet_size() {
        let cfg = Config {
            packet_size: 10,
            word_width: WordWidth::Bytes4,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_redundancy_below_one() {
        let cfg = Config {
            redundancy: 0.5,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn drop_count_rounds_up() {
        let cfg = Config {
            redundancy: 1.5,
            ..Config::default()
        };
        assert_eq!(cfg.drop_count(5), 8); // ceil(7.5) = 8
    }
}
