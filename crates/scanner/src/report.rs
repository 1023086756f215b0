//! Report output.
//!
//! Serializes ranked rows as CSV. The column order is fixed by the field
//! order of [`RankedLevel`]: price, trade_count, qty, quote_qty, buy_qty,
//! sell_qty, buy_pct, sell_pct, iceberg_side.

use iceberg_core::{RankedLevel, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write ranked rows as CSV to any writer.
pub fn write_report<W: Write>(writer: W, rows: &[RankedLevel]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write ranked rows as CSV to a file.
pub fn write_report_file(path: impl AsRef<Path>, rows: &[RankedLevel]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_report(file, rows)
}

/// Render ranked rows as a CSV string.
///
/// Used by tests and by callers that want the report without touching the
/// filesystem.
pub fn report_to_string(rows: &[RankedLevel]) -> Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| iceberg_core::Error::Other(e.to_string()))
}
