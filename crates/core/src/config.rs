//! Configuration for the iceberg-scan pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Tuning parameters for a scan run.
///
/// Paths are not part of the config; they are passed to the pipeline
/// directly so the same config can be reused across tapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Records per batch. Larger batches mean fewer merges but more
    /// working-set memory per batch.
    pub batch_size: usize,
    /// Decimal places the price is quantized to (2 -> cents). Higher
    /// values mean tighter level grouping.
    pub price_decimals: u32,
    /// Number of ranked levels to emit.
    pub top_n: usize,
    /// Emit a progress line every this many batches.
    pub progress_every: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: 300_000,
            price_decimals: 2,
            top_n: 10,
            progress_every: 5,
        }
    }
}

impl ScanConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: ScanConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a runnable scan.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::config("batch_size must be greater than zero"));
        }
        if self.top_n == 0 {
            return Err(Error::config("top_n must be greater than zero"));
        }
        // 10^d must stay exactly representable for the key arithmetic.
        if self.price_decimals > 12 {
            return Err(Error::config("price_decimals must be at most 12"));
        }
        Ok(())
    }
}
