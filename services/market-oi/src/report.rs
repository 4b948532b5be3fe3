//! Display statistics and rendering
//!
//! Derives strength/direction figures from aggregates and renders them as
//! plain text or JSON for the CLI.

use crate::types::{DateEntry, DayAggregate, MarketSeries, SkippedDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Sign of an OI figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Zero or positive
    Up,
    /// Negative
    Down,
}

impl Direction {
    /// Direction of a signed value; zero counts as up
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 { Self::Up } else { Self::Down }
    }

    /// Arrow glyph
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

/// Magnitude and sign of one OI figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideStat {
    /// Absolute value
    pub strength: f64,
    /// Sign
    pub direction: Direction,
}

impl SideStat {
    fn of(value: f64) -> Self {
        Self {
            strength: value.abs(),
            direction: Direction::of(value),
        }
    }
}

/// Statistics panel for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    /// Date the figures belong to
    pub date: DateEntry,
    /// Buy-side strength
    pub buy: SideStat,
    /// Sell-side strength
    pub sell: SideStat,
    /// Net strength
    pub net: SideStat,
    /// `"<filtered> of <total>"`
    pub active_symbols: String,
    /// Raw aggregate
    pub aggregate: DayAggregate,
}

impl MarketReport {
    /// Build the panel from an aggregate
    #[must_use]
    pub fn from_aggregate(date: &DateEntry, aggregate: &DayAggregate) -> Self {
        Self {
            date: date.clone(),
            buy: SideStat::of(aggregate.buy_oi),
            sell: SideStat::of(aggregate.sell_oi),
            net: SideStat::of(aggregate.net_oi),
            active_symbols: format!("{} of {}", aggregate.filtered_symbols, aggregate.total_symbols),
            aggregate: *aggregate,
        }
    }

    /// Reading of the buy side
    #[must_use]
    pub const fn buy_signal(&self) -> &'static str {
        match self.buy.direction {
            Direction::Up => "buying pressure",
            Direction::Down => "no buying",
        }
    }

    /// Reading of the sell side
    #[must_use]
    pub const fn sell_signal(&self) -> &'static str {
        match self.sell.direction {
            Direction::Up => "selling pressure",
            Direction::Down => "no selling",
        }
    }

    /// Multi-line text rendering
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Market OI - {}", self.date.label);
        let _ = writeln!(
            out,
            "  Buy strength:   {:>14.2} {} ({})",
            self.buy.strength,
            self.buy.direction.arrow(),
            self.buy_signal()
        );
        let _ = writeln!(
            out,
            "  Sell strength:  {:>14.2} {} ({})",
            self.sell.strength,
            self.sell.direction.arrow(),
            self.sell_signal()
        );
        let _ = writeln!(
            out,
            "  Net OI:         {:>14.2} {}",
            self.net.strength,
            self.net.direction.arrow()
        );
        let _ = writeln!(out, "  Active symbols: {}", self.active_symbols);
        out
    }
}

/// One row of the series table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    /// Date of the row
    pub date: DateEntry,
    /// Signed buy OI
    pub buy_oi: f64,
    /// Signed sell OI
    pub sell_oi: f64,
    /// Signed net OI
    pub net_oi: f64,
    /// Trend value at this date
    pub trend: f64,
    /// `"<filtered> of <total>"`
    pub active_symbols: String,
}

/// Tabular view of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    /// Trailing window of the trend column
    pub trend_window: usize,
    /// Loaded dates
    pub rows: Vec<SeriesRow>,
    /// Omitted dates
    pub skipped: Vec<SkippedDate>,
}

impl SeriesReport {
    /// Build the table from a collected series
    #[must_use]
    pub fn from_series(series: &MarketSeries, trend_window: usize) -> Self {
        let rows = series
            .points
            .iter()
            .zip(&series.trend)
            .map(|(point, &trend)| SeriesRow {
                date: point.date.clone(),
                buy_oi: point.aggregate.buy_oi,
                sell_oi: point.aggregate.sell_oi,
                net_oi: point.aggregate.net_oi,
                trend,
                active_symbols: format!(
                    "{} of {}",
                    point.aggregate.filtered_symbols, point.aggregate.total_symbols
                ),
            })
            .collect();

        Self {
            trend_window,
            rows,
            skipped: series.skipped.clone(),
        }
    }

    /// Fixed-width text table
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<12} {:>14} {:>14} {:>14} {:>14}  {}",
            "Date",
            "Buy OI",
            "Sell OI",
            "Net OI",
            format!("Trend({})", self.trend_window),
            "Active"
        );
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:<12} {:>14.2} {:>14.2} {:>14.2} {:>14.2}  {}",
                row.date.label, row.buy_oi, row.sell_oi, row.net_oi, row.trend, row.active_symbols
            );
        }
        for skipped in &self.skipped {
            let _ = writeln!(out, "{:<12} skipped: {}", skipped.date.label, skipped.reason);
        }
        out
    }
}
