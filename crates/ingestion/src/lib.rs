//! Trade tape ingestion for the iceberg-scan system.
//!
//! This crate handles:
//! - Input record parsing (permissive aggressor-flag coercion)
//! - Record validation (finite numerics only)
//! - Batched streaming reads of the tape

pub mod reader;
pub mod record;

pub use reader::BatchReader;
pub use record::{parse_flag, RawTrade};
