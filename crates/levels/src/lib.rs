//! Level aggregation for the iceberg-scan system.
//!
//! This crate holds the algorithmic core of the pipeline:
//! - Price-to-key quantization
//! - Per-batch partial aggregation
//! - The cumulative level book (additive merge)
//! - Ranked, classified report finalization

pub mod batch;
pub mod book;
pub mod quantize;
pub mod rank;

pub use batch::{aggregate_batch, BatchAggregate};
pub use book::LevelBook;
pub use quantize::{dequantize, quantize};
pub use rank::rank;
