//! Core data types for the iceberg-scan system.

use serde::{Deserialize, Serialize};

/// Integer key identifying a quantized price level.
///
/// Produced by rounding `price * 10^decimals`; two numerically close prices
/// that round to the same key share one level.
pub type PriceKey = i64;

/// A single execution from the trade tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Exchange-assigned trade id (assumed unique across the tape).
    pub id: i64,
    /// Execution price.
    pub price: f64,
    /// Base quantity.
    pub qty: f64,
    /// Quote quantity (notional).
    pub quote_qty: f64,
    /// True when the buyer was the passive (maker) side, i.e. the trade
    /// was seller-initiated.
    pub is_buyer_maker: bool,
}

impl TradeRecord {
    /// Whether the buyer was the aggressor (taker) on this trade.
    #[inline]
    pub fn buyer_initiated(&self) -> bool {
        !self.is_buyer_maker
    }
}

/// Accumulated statistics for one price level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Number of trades at this level.
    pub trade_count: u64,
    /// Total base quantity.
    pub qty: f64,
    /// Total quote quantity (notional).
    pub quote_qty: f64,
    /// Buyer-initiated base quantity.
    pub buy_qty: f64,
    /// Seller-initiated base quantity.
    pub sell_qty: f64,
}

impl LevelStats {
    /// Fold a single trade into the level.
    ///
    /// The quantity goes to exactly one of `buy_qty`/`sell_qty` depending
    /// on the aggressor side, so `buy_qty + sell_qty` tracks `qty`.
    pub fn add_trade(&mut self, trade: &TradeRecord) {
        self.trade_count += 1;
        self.qty += trade.qty;
        self.quote_qty += trade.quote_qty;
        if trade.buyer_initiated() {
            self.buy_qty += trade.qty;
        } else {
            self.sell_qty += trade.qty;
        }
    }

    /// Add another accumulator component-wise.
    pub fn merge(&mut self, other: &LevelStats) {
        self.trade_count += other.trade_count;
        self.qty += other.qty;
        self.quote_qty += other.quote_qty;
        self.buy_qty += other.buy_qty;
        self.sell_qty += other.sell_qty;
    }

    /// Buyer-initiated share of volume, in percent. Zero when the level
    /// has no volume.
    pub fn buy_pct(&self) -> f64 {
        if self.qty > 0.0 {
            100.0 * self.buy_qty / self.qty
        } else {
            0.0
        }
    }

    /// Seller-initiated share of volume, in percent. Zero when the level
    /// has no volume.
    pub fn sell_pct(&self) -> f64 {
        if self.qty > 0.0 {
            100.0 * self.sell_qty / self.qty
        } else {
            0.0
        }
    }

    /// Classify which side's hidden liquidity this level likely represents.
    pub fn iceberg_side(&self) -> IcebergSide {
        IcebergSide::classify(self.buy_qty, self.sell_qty)
    }
}

/// Heuristic classification of a level's hidden-liquidity side.
///
/// Heavy buyer-initiated volume means takers kept hitting resting sells,
/// so the hidden size sits on the sell side, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcebergSide {
    /// Buyers were the takers; hidden liquidity on the sell side.
    SellSide,
    /// Sellers were the takers; hidden liquidity on the buy side.
    BuySide,
    /// Balanced volume, no readable signal.
    Neutral,
}

impl IcebergSide {
    /// Classify from the buy/sell-initiated volume split.
    pub fn classify(buy_qty: f64, sell_qty: f64) -> Self {
        if buy_qty > sell_qty {
            IcebergSide::SellSide
        } else if sell_qty > buy_qty {
            IcebergSide::BuySide
        } else {
            IcebergSide::Neutral
        }
    }

    /// Human-readable label used in report output.
    pub fn label(self) -> &'static str {
        match self {
            IcebergSide::SellSide => "Sell-side Iceberg (buyers taker)",
            IcebergSide::BuySide => "Buy-side Iceberg (sellers taker)",
            IcebergSide::Neutral => "Neutral/Unclear",
        }
    }
}

impl std::fmt::Display for IcebergSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for IcebergSide {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// One ranked row of the final report.
///
/// Display fields are already rounded; the field order here is the column
/// order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLevel {
    /// Human-scale price of the level.
    pub price: f64,
    /// Number of trades at the level.
    pub trade_count: u64,
    /// Total base quantity.
    pub qty: f64,
    /// Total quote quantity (notional).
    pub quote_qty: f64,
    /// Buyer-initiated base quantity.
    pub buy_qty: f64,
    /// Seller-initiated base quantity.
    pub sell_qty: f64,
    /// Buyer-initiated share of volume, percent.
    pub buy_pct: f64,
    /// Seller-initiated share of volume, percent.
    pub sell_pct: f64,
    /// Hidden-liquidity side classification.
    pub iceberg_side: IcebergSide,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trade(price: f64, qty: f64, is_buyer_maker: bool) -> TradeRecord {
        TradeRecord {
            id: 1,
            price,
            qty,
            quote_qty: price * qty,
            is_buyer_maker,
        }
    }

    #[test]
    fn test_add_trade_splits_by_side() {
        let mut stats = LevelStats::default();

        stats.add_trade(&make_trade(100.0, 2.0, false)); // buyer taker
        stats.add_trade(&make_trade(100.0, 3.0, true)); // seller taker

        assert_eq!(stats.trade_count, 2);
        assert!((stats.qty - 5.0).abs() < 1e-10);
        assert!((stats.buy_qty - 2.0).abs() < 1e-10);
        assert!((stats.sell_qty - 3.0).abs() < 1e-10);
        assert!((stats.buy_qty + stats.sell_qty - stats.qty).abs() < 1e-10);
    }

    #[test]
    fn test_merge_component_wise() {
        let mut a = LevelStats {
            trade_count: 2,
            qty: 5.0,
            quote_qty: 500.0,
            buy_qty: 2.0,
            sell_qty: 3.0,
        };
        let b = LevelStats {
            trade_count: 1,
            qty: 1.0,
            quote_qty: 100.0,
            buy_qty: 1.0,
            sell_qty: 0.0,
        };

        a.merge(&b);

        assert_eq!(a.trade_count, 3);
        assert!((a.qty - 6.0).abs() < 1e-10);
        assert!((a.quote_qty - 600.0).abs() < 1e-10);
        assert!((a.buy_qty - 3.0).abs() < 1e-10);
        assert!((a.sell_qty - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let mut stats = LevelStats::default();
        stats.add_trade(&make_trade(100.0, 1.0, false));
        stats.add_trade(&make_trade(100.0, 2.0, true));

        assert!((stats.buy_pct() + stats.sell_pct() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_zero_on_empty_level() {
        let stats = LevelStats::default();
        assert_eq!(stats.buy_pct(), 0.0);
        assert_eq!(stats.sell_pct(), 0.0);
    }

    #[test]
    fn test_classify_three_way() {
        assert_eq!(IcebergSide::classify(10.0, 3.0), IcebergSide::SellSide);
        assert_eq!(IcebergSide::classify(2.0, 8.0), IcebergSide::BuySide);
        assert_eq!(IcebergSide::classify(5.0, 5.0), IcebergSide::Neutral);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            IcebergSide::SellSide.label(),
            "Sell-side Iceberg (buyers taker)"
        );
        assert_eq!(
            IcebergSide::BuySide.label(),
            "Buy-side Iceberg (sellers taker)"
        );
        assert_eq!(IcebergSide::Neutral.label(), "Neutral/Unclear");
    }
}
