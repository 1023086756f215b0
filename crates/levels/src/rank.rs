//! Ranked report finalization.
//!
//! Turns a finished level book into rounded, classified report rows.
//! Rounding applies to the output rows only; the book is never written
//! back to.

use crate::book::LevelBook;
use crate::quantize::dequantize;
use iceberg_core::{LevelStats, PriceKey, RankedLevel};

/// Round a value to a fixed number of decimal places.
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

fn to_row(key: PriceKey, stats: &LevelStats, decimals: u32) -> RankedLevel {
    RankedLevel {
        price: round_to(dequantize(key, decimals), decimals),
        trade_count: stats.trade_count,
        qty: round_to(stats.qty, 3),
        quote_qty: round_to(stats.quote_qty, 2),
        buy_qty: round_to(stats.buy_qty, 3),
        sell_qty: round_to(stats.sell_qty, 3),
        buy_pct: round_to(stats.buy_pct(), 1),
        sell_pct: round_to(stats.sell_pct(), 1),
        iceberg_side: stats.iceberg_side(),
    }
}

/// Rank the book's levels and emit the top-N report rows.
///
/// Levels sort by trade count descending. The book iterates in ascending
/// key order and the sort is stable, so equal counts tie-break on
/// ascending price key.
pub fn rank(book: &LevelBook, decimals: u32, top_n: usize) -> Vec<RankedLevel> {
    let mut levels: Vec<(PriceKey, LevelStats)> =
        book.iter().map(|(key, stats)| (*key, *stats)).collect();

    levels.sort_by(|a, b| b.1.trade_count.cmp(&a.1.trade_count));

    levels
        .iter()
        .take(top_n)
        .map(|(key, stats)| to_row(*key, stats, decimals))
        .collect()
}
