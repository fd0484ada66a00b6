use std::str::FromStr;

use crate::error::{AprioriError, Result};
use crate::types::{Count, ItemsetLength};

pub const MIN_THRESHOLD: f64 = 0.01;
pub const MAX_THRESHOLD: f64 = 0.99;

// absorbs representation error in products like 0.07 * 100
const SUPPORT_EPSILON: f64 = 1e-9;

/// Minimum support as a fraction of the transaction count.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
            return Err(AprioriError::ThresholdOutOfRange {
                value,
                min: MIN_THRESHOLD,
                max: MAX_THRESHOLD,
            });
        }
        Ok(Threshold(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Threshold {
    type Err = AprioriError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| AprioriError::ThresholdNotANumber {
                input: s.to_owned(),
            })?;
        Threshold::new(value)
    }
}

/// How the bucketed counter walks the transactions of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountingMode {
    #[default]
    Sequential,
    /// Transactions are split across the rayon pool and per-worker counts are
    /// summed afterwards.
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinerConfig {
    pub threshold: Threshold,
    /// Stop after this level even if candidates survive. `None` runs until the
    /// candidate table is empty.
    pub max_len: Option<ItemsetLength>,
    pub counting: CountingMode,
}

impl MinerConfig {
    pub fn new(threshold: Threshold) -> Self {
        MinerConfig {
            threshold,
            max_len: None,
            counting: CountingMode::Sequential,
        }
    }

    pub fn with_max_len(mut self, max_len: ItemsetLength) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn with_counting(mut self, counting: CountingMode) -> Self {
        self.counting = counting;
        self
    }
}

/// Constants of one run, fixed once the transaction count is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    pub num_transactions: usize,
    pub threshold: Threshold,
    /// `ceil(threshold * N)`, and never less than 1: the smallest count that
    /// survives pruning.
    pub min_count: Count,
}

impl Support {
    pub fn new(threshold: Threshold, num_transactions: usize) -> Self {
        let exact = threshold.value() * num_transactions as f64;
        let min_count = ((exact - SUPPORT_EPSILON).ceil() as Count).max(1);
        Support {
            num_transactions,
            threshold,
            min_count,
        }
    }

    /// Nothing is frequent in a database that declares no transactions.
    pub fn is_frequent(&self, count: Count) -> bool {
        self.num_transactions > 0 && count >= self.min_count
    }
}
