//! Core types and configuration for the iceberg-scan system.
//!
//! This crate provides shared types used across all other crates:
//! - Trade tape and level aggregate types
//! - Scan configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::ScanConfig;
pub use error::{Error, Result};
pub use types::*;
