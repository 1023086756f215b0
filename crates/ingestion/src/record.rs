//! Input record parsing and validation.
//!
//! The tape's aggressor flag arrives in whatever form the upstream dump
//! used ("true", "True", "1", ...), so it goes through a permissive total
//! coercion. Numeric fields are strict: a record that fails to parse is
//! rejected by the reader, never silently folded into the aggregates.

use iceberg_core::{Error, Result, TradeRecord};
use serde::{Deserialize, Deserializer};

/// Tokens recognized as true by [`parse_flag`], compared case-insensitively.
const TRUTHY_TOKENS: [&str; 5] = ["true", "1", "t", "yes", "y"];

/// Coerce an arbitrary string to a boolean.
///
/// Total function: any input not in the truthy set (after trimming and
/// lowercasing) is false. Never errors.
pub fn parse_flag(raw: &str) -> bool {
    let token = raw.trim().to_ascii_lowercase();
    TRUTHY_TOKENS.contains(&token.as_str())
}

fn flag_from_str<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_flag(&raw))
}

/// One row of the input tape as deserialized from CSV.
///
/// Fields are matched by header name; extra columns in the file are
/// ignored. A missing aggressor flag column defaults to false.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrade {
    /// Exchange-assigned trade id.
    pub id: i64,
    /// Execution price.
    pub price: f64,
    /// Base quantity.
    pub qty: f64,
    /// Quote quantity (notional).
    pub quote_qty: f64,
    /// Maker-side flag, permissively coerced.
    #[serde(default, deserialize_with = "flag_from_str")]
    pub is_buyer_maker: bool,
}

impl RawTrade {
    /// Validate numeric fields and convert into a [`TradeRecord`].
    ///
    /// Non-finite numerics are rejected here so they never reach the
    /// quantizer or the running sums.
    pub fn validate(self) -> Result<TradeRecord> {
        if !self.price.is_finite() {
            return Err(Error::data(format!(
                "trade {}: non-finite price {}",
                self.id, self.price
            )));
        }
        if !self.qty.is_finite() {
            return Err(Error::data(format!(
                "trade {}: non-finite qty {}",
                self.id, self.qty
            )));
        }
        if !self.quote_qty.is_finite() {
            return Err(Error::data(format!(
                "trade {}: non-finite quote_qty {}",
                self.id, self.quote_qty
            )));
        }
        Ok(TradeRecord {
            id: self.id,
            price: self.price,
            qty: self.qty,
            quote_qty: self.quote_qty,
            is_buyer_maker: self.is_buyer_maker,
        })
    }
}
