//! Price-to-level quantization.
//!
//! Maps floating prices onto integer level keys at a fixed decimal
//! precision. One rounding rule, applied identically to every trade in
//! every batch; mixing rules would fragment a level's counts across
//! adjacent keys.

use iceberg_core::{Error, PriceKey, Result};

/// Multiplier scaling a price into its integer key space.
#[inline]
pub fn scale(decimals: u32) -> f64 {
    10f64.powi(decimals as i32)
}

/// Map a price to its level key at the given precision.
///
/// Computes `round(price * 10^decimals)` with `f64::round`, i.e.
/// half-away-from-zero: at zero decimals, 2.5 keys to 3 and -2.5 to -3.
/// Non-finite prices are rejected, never quantized.
pub fn quantize(price: f64, decimals: u32) -> Result<PriceKey> {
    if !price.is_finite() {
        return Err(Error::data(format!(
            "cannot quantize non-finite price {price}"
        )));
    }
    Ok((price * scale(decimals)).round() as PriceKey)
}

/// Recover the human-scale price of a level key.
#[inline]
pub fn dequantize(key: PriceKey, decimals: u32) -> f64 {
    key as f64 / scale(decimals)
}
