//! Market-wide OI aggregation
//!
//! Reduces one day of symbol snapshots into a single [`DayAggregate`]:
//! - Liquidity gate: `volume_7days >= monthly_volume`
//! - Buy side: pressure present when `buy_ratio < 1`
//! - Sell side: pressure present when `sell_ratio > 1`
//! - Both sides weighted by `volume_7days`

use crate::types::{DayAggregate, SymbolRecord};
use tracing::debug;

/// Incremental OI reducer
///
/// Push records in any number of batches, then [`finish`](Self::finish) once.
#[derive(Debug, Default, Clone)]
pub struct MarketOiAccumulator {
    buy_oi: f64,
    sell_oi: f64,
    filtered: usize,
    total: usize,
}

impl MarketOiAccumulator {
    /// Create empty accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buy_oi: 0.0,
            sell_oi: 0.0,
            filtered: 0,
            total: 0,
        }
    }

    /// Fold one record into the running totals
    pub fn push(&mut self, record: &SymbolRecord) {
        self.total += 1;
        if !record.passes_filter() {
            return;
        }
        self.filtered += 1;

        let volume = record.volume_7days;

        if record.buy_ratio < 1.0 {
            self.buy_oi += (1.0 - record.buy_ratio) * volume;
        } else {
            self.buy_oi -= (record.buy_ratio - 1.0) * volume;
        }

        if record.sell_ratio > 1.0 {
            self.sell_oi += (record.sell_ratio - 1.0) * volume;
        } else {
            self.sell_oi -= (1.0 - record.sell_ratio) * volume;
        }
    }

    /// Number of records seen so far
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Close the reduction; net OI is derived here and nowhere else
    #[must_use]
    pub fn finish(self) -> DayAggregate {
        DayAggregate {
            buy_oi: self.buy_oi,
            sell_oi: self.sell_oi,
            net_oi: self.buy_oi + self.sell_oi,
            filtered_symbols: self.filtered,
            total_symbols: self.total,
        }
    }
}

impl<'a> Extend<&'a SymbolRecord> for MarketOiAccumulator {
    fn extend<I: IntoIterator<Item = &'a SymbolRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

/// Reduce one day's records into a market-wide aggregate
#[must_use]
pub fn calculate_market_oi(records: &[SymbolRecord]) -> DayAggregate {
    let mut acc = MarketOiAccumulator::new();
    acc.extend(records);
    let aggregate = acc.finish();

    debug!(
        filtered = aggregate.filtered_symbols,
        total = aggregate.total_symbols,
        "Filtered {} of {} symbols",
        aggregate.filtered_symbols,
        aggregate.total_symbols
    );

    aggregate
}
