//! Market OI data model

use serde::{Deserialize, Deserializer, Serialize};

/// One symbol's daily snapshot
///
/// Records carry no identity; any extra fields the producer emits are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Trailing 7-day traded volume
    #[serde(default, deserialize_with = "null_as_zero")]
    pub volume_7days: f64,
    /// Trailing monthly traded volume
    #[serde(default, deserialize_with = "null_as_zero")]
    pub monthly_volume: f64,
    /// Buy-side pressure ratio (1 = neutral)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub buy_ratio: f64,
    /// Sell-side pressure ratio (1 = neutral)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub sell_ratio: f64,
}

impl SymbolRecord {
    /// Create new record
    #[must_use]
    pub const fn new(volume_7days: f64, monthly_volume: f64, buy_ratio: f64, sell_ratio: f64) -> Self {
        Self {
            volume_7days,
            monthly_volume,
            buy_ratio,
            sell_ratio,
        }
    }

    /// Liquidity gate: short-term volume at or above monthly volume
    #[must_use]
    pub fn passes_filter(&self) -> bool {
        self.volume_7days >= self.monthly_volume
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Aggregate OI for one trading day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    /// Signed buy-side OI
    #[serde(rename = "buyOI")]
    pub buy_oi: f64,
    /// Signed sell-side OI
    #[serde(rename = "sellOI")]
    pub sell_oi: f64,
    /// `buy_oi + sell_oi`
    #[serde(rename = "netOI")]
    pub net_oi: f64,
    /// Records that passed the liquidity gate
    #[serde(rename = "filteredSymbols")]
    pub filtered_symbols: usize,
    /// All records seen
    #[serde(rename = "totalSymbols")]
    pub total_symbols: usize,
}

/// Configured trading date and its display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateEntry {
    /// Date identifier used to locate the snapshot (e.g. `14040730`)
    pub value: String,
    /// Human-readable label (e.g. `1404/07/30`)
    pub label: String,
}

impl DateEntry {
    /// Create new date entry
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Create entry whose label is derived from the identifier
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = format_date_label(&value);
        Self { value, label }
    }
}

/// Format an 8-digit `YYYYMMDD` identifier as `YYYY/MM/DD`
///
/// Anything else is returned unchanged.
#[must_use]
pub fn format_date_label(value: &str) -> String {
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}/{}/{}", &value[0..4], &value[4..6], &value[6..8])
    } else {
        value.to_string()
    }
}

/// Aggregate for one successfully loaded date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Date the aggregate belongs to
    pub date: DateEntry,
    /// Reduced OI
    pub aggregate: DayAggregate,
}

/// Date omitted from a series and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDate {
    /// Date that failed to load
    pub date: DateEntry,
    /// Rendered load error
    pub reason: String,
}

/// Ordered per-date series with its trend line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    /// Loaded dates, in configured order
    pub points: Vec<DailyPoint>,
    /// Smoothed net OI, one value per point
    pub trend: Vec<f64>,
    /// Dates that could not be loaded
    pub skipped: Vec<SkippedDate>,
}

impl MarketSeries {
    /// Net OI values in series order
    #[must_use]
    pub fn net_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.aggregate.net_oi).collect()
    }

    /// Number of loaded dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no date loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
