//! Entropy and redundancy of a byte source.
//!
//! Bytes are treated as symbols of a 256-letter alphabet. Two models are
//! measured:
//! - order 0: every byte drawn independently, H(X)
//! - order 1: every byte depends on the previous one, H(Xₙ₊₁ | Xₙ)
//!
//! Redundancy is reported against the alphabet actually observed
//! (`log2(distinct symbols)`) and, for the order-0 model, against the full
//! 8-bit byte alphabet.

use crate::error::{EntropyError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Bits needed to send one raw byte.
pub const BYTE_ENTROPY: f64 = 8.0;

/// Shannon entropy in bits of a probability vector.
///
/// Zero entries contribute nothing (the limit of `p log p` as `p → 0`).
pub fn entropy(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Entropy in bits of an empirical histogram.
fn entropy_from_counts<I: IntoIterator<Item = u64>>(counts: I, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Order-0 histogram: one slot per byte value.
#[derive(Debug, Clone)]
pub struct SymbolCounts {
    counts: [u64; 256],
    total: u64,
}

impl SymbolCounts {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self {
            counts,
            total: data.len() as u64,
        }
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// H(X) in bits/symbol.
    pub fn entropy(&self) -> f64 {
        entropy_from_counts(self.counts.iter().copied(), self.total)
    }
}

/// Order-1 histogram of consecutive byte pairs `(data[i], data[i + 1])`.
#[derive(Debug, Clone, Default)]
pub struct PairCounts {
    pairs: HashMap<(u8, u8), u64>,
    prefixes: HashMap<u8, u64>,
    total: u64,
}

impl PairCounts {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = Self::default();
        for window in data.windows(2) {
            *counts.pairs.entry((window[0], window[1])).or_insert(0) += 1;
            *counts.prefixes.entry(window[0]).or_insert(0) += 1;
            counts.total += 1;
        }
        counts
    }

    pub fn count(&self, first: u8, second: u8) -> u64 {
        self.pairs.get(&(first, second)).copied().unwrap_or(0)
    }

    /// Number of pairs (`len - 1` for non-empty input).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// H(Xₙ, Xₙ₊₁) in bits/pair.
    pub fn joint_entropy(&self) -> f64 {
        entropy_from_counts(self.pairs.values().copied(), self.total)
    }

    /// H(Xₙ₊₁ | Xₙ) = H(Xₙ, Xₙ₊₁) − H(Xₙ), in bits/symbol.
    pub fn conditional_entropy(&self) -> f64 {
        let prefix = entropy_from_counts(self.prefixes.values().copied(), self.total);
        (self.joint_entropy() - prefix).max(0.0)
    }
}

/// Which source model a figure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Independent symbols
    Zero,
    /// Each symbol conditioned on its predecessor
    One,
}

/// How much a source could shrink under an ideal order-0 coder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compressibility {
    High,
    Moderate,
    /// Probably already compressed or encrypted
    Low,
}

/// Entropy and redundancy figures for one byte source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub total_symbols: u64,
    pub distinct_symbols: usize,
    /// H(X), bits/symbol
    pub order0_entropy: f64,
    /// H(Xₙ, Xₙ₊₁), bits/pair
    pub pair_entropy: f64,
    /// H(Xₙ₊₁ | Xₙ), bits/symbol
    pub order1_entropy: f64,
    /// log2(distinct symbols), 0 for a single-symbol source
    pub max_entropy: f64,
}

impl SourceReport {
    /// Measure `data`.
    ///
    /// # Errors
    /// `EntropyError::EmptySource` if `data` is empty.
    pub fn analyze(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(EntropyError::EmptySource.into());
        }

        let symbols = SymbolCounts::from_bytes(data);
        let pairs = PairCounts::from_bytes(data);
        let distinct = symbols.distinct();

        let report = Self {
            total_symbols: symbols.total(),
            distinct_symbols: distinct,
            order0_entropy: symbols.entropy(),
            pair_entropy: pairs.joint_entropy(),
            order1_entropy: pairs.conditional_entropy(),
            max_entropy: if distinct > 1 { (distinct as f64).log2() } else { 0.0 },
        };
        tracing::debug!(
            total = report.total_symbols,
            distinct,
            h0 = report.order0_entropy,
            h1 = report.order1_entropy,
            "source analyzed"
        );
        Ok(report)
    }

    pub fn entropy(&self, order: Order) -> f64 {
        match order {
            Order::Zero => self.order0_entropy,
            Order::One => self.order1_entropy,
        }
    }

    /// max_entropy − H, in bits/symbol.
    pub fn redundancy(&self, order: Order) -> f64 {
        (self.max_entropy - self.entropy(order)).max(0.0)
    }

    /// H / max_entropy, or 0 when the source has a single symbol.
    pub fn efficiency(&self, order: Order) -> f64 {
        if self.max_entropy == 0.0 {
            0.0
        } else {
            self.entropy(order) / self.max_entropy
        }
    }

    /// 1 − H(X)/8: order-0 redundancy relative to raw bytes.
    pub fn byte_redundancy(&self) -> f64 {
        1.0 - self.order0_entropy / BYTE_ENTROPY
    }

    pub fn compressibility(&self) -> Compressibility {
        let r = self.byte_redundancy();
        if r > 0.5 {
            Compressibility::High
        } else if r < 0.1 {
            Compressibility::Low
        } else {
            Compressibility::Moderate
        }
    }
}
