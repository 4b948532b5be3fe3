//! Market OI configuration

use crate::collector::DayCollector;
use crate::error::{OiError, Result};
use crate::loader::{DayLoader, FileDayLoader, HttpDayLoader};
use crate::trend::TREND_WINDOW;
use crate::types::DateEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where snapshots come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// Local directory holding `processed_data_<date>.json`
    File {
        /// Directory path
        root: PathBuf,
    },
    /// Static HTTP host serving the same files
    Http {
        /// Base URL
        base_url: String,
    },
}

/// Market OI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOiConfig {
    /// Snapshot source
    pub source: DataSource,

    /// Dates to process, in display order
    pub dates: Vec<DateEntry>,

    /// Trailing window for the trend line
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// Per-date load timeout in seconds (none = wait indefinitely)
    #[serde(default)]
    pub load_timeout_secs: Option<u64>,
}

const fn default_trend_window() -> usize {
    TREND_WINDOW
}

impl Default for MarketOiConfig {
    fn default() -> Self {
        Self {
            source: DataSource::File {
                root: PathBuf::from("."),
            },
            dates: ["14040726", "14040727", "14040728", "14040729", "14040730"]
                .into_iter()
                .map(DateEntry::from_value)
                .collect(),
            trend_window: TREND_WINDOW,
            load_timeout_secs: None,
        }
    }
}

impl MarketOiConfig {
    /// Read configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| OiError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| OiError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the collector cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.trend_window == 0 {
            return Err(OiError::InvalidWindow(self.trend_window));
        }
        if let Some(entry) = self.dates.iter().find(|d| d.value.is_empty()) {
            return Err(OiError::Config(format!("empty date identifier (label {:?})", entry.label)));
        }
        Ok(())
    }

    /// Look up a configured date, falling back to a derived label
    #[must_use]
    pub fn date_entry(&self, value: &str) -> DateEntry {
        self.dates
            .iter()
            .find(|d| d.value == value)
            .cloned()
            .unwrap_or_else(|| DateEntry::from_value(value))
    }

    /// Build the loader for the configured source
    #[must_use]
    pub fn loader(&self) -> Arc<dyn DayLoader> {
        match &self.source {
            DataSource::File { root } => Arc::new(FileDayLoader::new(root.clone())),
            DataSource::Http { base_url } => Arc::new(HttpDayLoader::new(base_url.clone())),
        }
    }

    /// Build a collector from the configuration
    #[must_use]
    pub fn collector(&self) -> DayCollector {
        let collector = DayCollector::new(self.loader(), self.trend_window);
        match self.load_timeout_secs {
            Some(secs) => collector.with_load_timeout(Duration::from_secs(secs)),
            None => collector,
        }
    }
}
