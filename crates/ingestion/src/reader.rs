//! Batched streaming reads of the trade tape.
//!
//! The tape is consumed sequentially, front to back, in batches of at most
//! `batch_size` records. Input order is preserved within and across
//! batches. Malformed records are skipped and counted; underlying I/O
//! failures abort the read.

use crate::record::RawTrade;
use iceberg_core::{Result, TradeRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Streaming batch reader over a CSV trade tape.
///
/// Generic over the byte source so tests can feed in-memory tapes; real
/// runs use [`BatchReader::from_path`].
pub struct BatchReader<R: Read> {
    records: csv::DeserializeRecordsIntoIter<R, RawTrade>,
    batch_size: usize,
    skipped: u64,
}

impl BatchReader<File> {
    /// Open a tape file for batched reading.
    pub fn from_path(path: impl AsRef<Path>, batch_size: usize) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(file, batch_size))
    }
}

impl<R: Read> BatchReader<R> {
    /// Wrap a byte source holding a headered CSV tape.
    pub fn new(reader: R, batch_size: usize) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader)
            .into_deserialize();
        Self {
            records,
            batch_size,
            skipped: 0,
        }
    }

    /// Read the next batch of up to `batch_size` records.
    ///
    /// Returns `Ok(None)` once the tape is exhausted. Records that fail to
    /// deserialize or validate are skipped with a warning and counted in
    /// [`BatchReader::skipped`]; I/O errors from the underlying source
    /// propagate as errors.
    pub fn next_batch(&mut self) -> Result<Option<Vec<TradeRecord>>> {
        let mut batch = Vec::with_capacity(self.batch_size);

        while batch.len() < self.batch_size {
            match self.records.next() {
                Some(Ok(raw)) => match raw.validate() {
                    Ok(record) => batch.push(record),
                    Err(err) => {
                        self.skipped += 1;
                        warn!("skipping record: {err}");
                    }
                },
                Some(Err(err)) => {
                    if err.is_io_error() {
                        return Err(err.into());
                    }
                    self.skipped += 1;
                    warn!("skipping malformed record: {err}");
                }
                None => break,
            }
        }

        if batch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(batch))
        }
    }

    /// Number of records skipped so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_reader(csv_text: &str, batch_size: usize) -> BatchReader<Cursor<Vec<u8>>> {
        BatchReader::new(Cursor::new(csv_text.as_bytes().to_vec()), batch_size)
    }

    const TAPE: &str = "\
id,price,qty,quote_qty,is_buyer_maker
1,100.01,1.0,100.01,false
2,100.02,2.0,200.04,true
3,100.03,3.0,300.09,false
4,100.04,4.0,400.16,True
5,100.05,5.0,500.25,1
";

    #[test]
    fn test_batching_and_order() {
        let mut reader = make_reader(TAPE, 2);

        let first = reader.next_batch().unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, 1);
        assert_eq!(first[1].id, 2);

        let second = reader.next_batch().unwrap().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].id, 3);

        let third = reader.next_batch().unwrap().unwrap();
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].id, 5);

        assert!(reader.next_batch().unwrap().is_none());
        assert_eq!(reader.skipped(), 0);
    }

    #[test]
    fn test_flag_coercion_variants() {
        let mut reader = make_reader(TAPE, 10);
        let batch = reader.next_batch().unwrap().unwrap();

        assert!(!batch[0].is_buyer_maker);
        assert!(batch[1].is_buyer_maker);
        assert!(batch[3].is_buyer_maker); // "True"
        assert!(batch[4].is_buyer_maker); // "1"
    }

    #[test]
    fn test_header_only_tape() {
        let mut reader = make_reader("id,price,qty,quote_qty,is_buyer_maker\n", 10);
        assert!(reader.next_batch().unwrap().is_none());
        assert_eq!(reader.skipped(), 0);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let tape = "\
id,price,qty,quote_qty,time,is_buyer_maker,is_best_match
1,100.01,1.0,100.01,1693526401000,false,true
";
        let mut reader = make_reader(tape, 10);
        let batch = reader.next_batch().unwrap().unwrap();
        assert_eq!(batch.len(), 1);
        assert!((batch[0].price - 100.01).abs() < 1e-10);
        assert!(!batch[0].is_buyer_maker);
    }

    #[test]
    fn test_missing_flag_column_defaults_false() {
        let tape = "\
id,price,qty,quote_qty
1,100.01,1.0,100.01
";
        let mut reader = make_reader(tape, 10);
        let batch = reader.next_batch().unwrap().unwrap();
        assert!(!batch[0].is_buyer_maker);
    }

    #[test]
    fn test_malformed_records_skipped_and_counted() {
        let tape = "\
id,price,qty,quote_qty,is_buyer_maker
1,100.01,1.0,100.01,false
2,not-a-price,2.0,200.04,true
3,NaN,3.0,300.09,false
4,100.04,4.0,400.16,true
";
        let mut reader = make_reader(tape, 10);
        let batch = reader.next_batch().unwrap().unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, 1);
        assert_eq!(batch[1].id, 4);
        assert_eq!(reader.skipped(), 2);
    }

    #[test]
    fn test_unparsable_flag_is_false_not_error() {
        let tape = "\
id,price,qty,quote_qty,is_buyer_maker
1,100.01,1.0,100.01,banana
";
        let mut reader = make_reader(tape, 10);
        let batch = reader.next_batch().unwrap().unwrap();
        assert_eq!(batch.len(), 1);
        assert!(!batch[0].is_buyer_maker);
        assert_eq!(reader.skipped(), 0);
    }
}
