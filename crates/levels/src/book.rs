//! Cumulative level book.

use crate::batch::BatchAggregate;
use iceberg_core::{LevelStats, PriceKey};
use std::collections::BTreeMap;

/// The running aggregate over every batch merged so far.
///
/// Created empty, fed one partial per batch, then read out once by the
/// finalizer. The book is an explicit accumulator owned by the pipeline
/// driver; nothing else mutates it.
///
/// Memory grows with the number of distinct price keys seen. That is the
/// only unbounded resource in the pipeline: a tape whose prices are nearly
/// unique per trade degrades to one entry per trade.
#[derive(Debug, Clone, Default)]
pub struct LevelBook {
    levels: BTreeMap<PriceKey, LevelStats>,
}

impl LevelBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch's partial aggregate into the book.
    ///
    /// Insert-or-add per key, component-wise. The merge is associative and
    /// commutative across batches (up to floating-point reassociation), so
    /// changing the batch size changes memory and merge count but never
    /// the final book. Keys are never removed.
    pub fn merge(&mut self, partial: BatchAggregate) {
        for (key, stats) in partial.into_levels() {
            self.levels
                .entry(key)
                .and_modify(|level| level.merge(&stats))
                .or_insert(stats);
        }
    }

    /// Number of distinct levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether any level has been recorded.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Look up one level's stats.
    pub fn get(&self, key: PriceKey) -> Option<&LevelStats> {
        self.levels.get(&key)
    }

    /// Iterate levels in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PriceKey, &LevelStats)> {
        self.levels.iter()
    }
}
