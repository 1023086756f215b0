//! End-to-end scan pipeline.
//!
//! Reads the tape in batches, folds each batch's partial aggregate into
//! the level book, and finalizes the ranked report once the tape is
//! exhausted. Strictly sequential: one batch in flight, one merge per
//! batch, no shared state.

use crate::report::write_report_file;
use iceberg_core::{RankedLevel, Result, ScanConfig};
use iceberg_ingestion::BatchReader;
use iceberg_levels::{aggregate_batch, rank, LevelBook};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Counters describing a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Batches processed.
    pub batches: u64,
    /// Records aggregated (skipped records not included).
    pub records: u64,
    /// Malformed records skipped by the reader.
    pub skipped: u64,
    /// Distinct price levels in the cumulative book.
    pub distinct_levels: usize,
    /// Ranked rows written to the report.
    pub rows_written: usize,
}

/// Pipeline driver: batch loop, merge, finalize, report.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with a validated configuration.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this scanner runs with.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Aggregate an entire tape into a level book.
    ///
    /// The book is the explicit accumulator of the whole run: created
    /// here, fed one merge per batch, returned to the caller. Changing
    /// the batch size changes memory use, never the resulting book.
    pub fn aggregate<R: Read>(
        &self,
        reader: &mut BatchReader<R>,
    ) -> Result<(LevelBook, ScanSummary)> {
        let mut book = LevelBook::new();
        let mut summary = ScanSummary::default();

        while let Some(batch) = reader.next_batch()? {
            summary.batches += 1;
            summary.records += batch.len() as u64;

            let partial = aggregate_batch(&batch, self.config.price_decimals)?;
            book.merge(partial);

            if self.config.progress_every > 0
                && summary.batches % self.config.progress_every == 0
            {
                info!(
                    "processed {} batches ({} records, {} levels)",
                    summary.batches,
                    summary.records,
                    book.len()
                );
            }
        }

        summary.skipped = reader.skipped();
        summary.distinct_levels = book.len();
        Ok((book, summary))
    }

    /// Rank a finished book into report rows.
    pub fn rank(&self, book: &LevelBook) -> Vec<RankedLevel> {
        rank(book, self.config.price_decimals, self.config.top_n)
    }

    /// Run the full pipeline from a tape file to a report file.
    ///
    /// An empty tape is not an error: the run completes, logs that there
    /// was no data, writes no report file, and the summary shows zero
    /// rows written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ScanSummary> {
        let mut reader = BatchReader::from_path(input, self.config.batch_size)?;
        let (book, mut summary) = self.aggregate(&mut reader)?;

        if book.is_empty() {
            info!("no data found in {}", input.display());
            return Ok(summary);
        }

        let rows = self.rank(&book);
        write_report_file(output, &rows)?;
        summary.rows_written = rows.len();

        info!(
            "wrote {} ranked levels to {} ({} records over {} batches, {} skipped)",
            summary.rows_written,
            output.display(),
            summary.records,
            summary.batches,
            summary.skipped
        );
        Ok(summary)
    }
}
