//! Market OI Service
//!
//! Volume-weighted buy/sell pressure across a market's symbols:
//! - Daily aggregation of per-symbol snapshots into buy, sell and net OI
//! - Trailing moving-average trend line over daily net OI
//! - Concurrent per-date loading from disk or HTTP with failure isolation
//! - Text and JSON reporting

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod session;
pub mod trend;
pub mod types;

pub use aggregator::{MarketOiAccumulator, calculate_market_oi};
pub use collector::DayCollector;
pub use config::{DataSource, MarketOiConfig};
pub use error::{LoadError, OiError, Result};
pub use loader::{DayLoader, FileDayLoader, HttpDayLoader, data_file_name};
pub use report::{Direction, MarketReport, SeriesReport, SeriesRow, SideStat};
pub use session::MarketSession;
pub use trend::{TREND_WINDOW, TrendSmoother, calculate_trend_line, calculate_trend_line_with_window};
pub use types::{
    DailyPoint, DateEntry, DayAggregate, MarketSeries, SkippedDate, SymbolRecord, format_date_label,
};
