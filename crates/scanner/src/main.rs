//! Command-line entry point for the iceberg-scan pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use iceberg_core::ScanConfig;
use iceberg_scanner::Scanner;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rank trade-tape price levels by trade frequency and classify their
/// likely hidden-liquidity side.
#[derive(Parser, Debug)]
#[command(name = "iceberg-scan", version, about)]
struct Cli {
    /// Input trade tape CSV (id, price, qty, quote_qty, is_buyer_maker).
    input: PathBuf,
    /// Output CSV for the ranked levels.
    #[arg(long, default_value = "iceberg-levels.csv", value_name = "FILE")]
    output: PathBuf,
    /// JSON file with scan parameters; explicit flags override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Records per batch.
    #[arg(long, value_name = "N")]
    batch_size: Option<usize>,
    /// Price precision in decimal places.
    #[arg(long, value_name = "N")]
    price_decimals: Option<u32>,
    /// Number of ranked levels to emit.
    #[arg(long, value_name = "N")]
    top_n: Option<usize>,
    /// Progress line interval, in batches.
    #[arg(long, value_name = "N")]
    progress_every: Option<u64>,
}

impl Cli {
    fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)
                .with_context(|| format!("unable to load config {}", path.display()))?,
            None => ScanConfig::default(),
        };

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(price_decimals) = self.price_decimals {
            config.price_decimals = price_decimals;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(progress_every) = self.progress_every {
            config.progress_every = progress_every;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.scan_config()?;
    let scanner = Scanner::new(config).context("invalid scan configuration")?;

    scanner
        .run(&cli.input, &cli.output)
        .with_context(|| format!("scan of {} failed", cli.input.display()))?;

    Ok(())
}
