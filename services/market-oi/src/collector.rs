//! Day collector
//!
//! Fans out one load per configured date, aggregates each snapshot that
//! arrives, and assembles the ordered series plus its trend line. A date whose
//! load fails is dropped from the series without affecting the others.

use crate::aggregator::calculate_market_oi;
use crate::error::{LoadError, Result};
use crate::loader::DayLoader;
use crate::trend::calculate_trend_line_with_window;
use crate::types::{DailyPoint, DateEntry, MarketSeries, SkippedDate};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Loads and aggregates a list of dates
#[derive(Clone)]
pub struct DayCollector {
    loader: Arc<dyn DayLoader>,
    trend_window: usize,
    load_timeout: Option<Duration>,
}

impl std::fmt::Debug for DayCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayCollector")
            .field("loader", &"Arc<dyn DayLoader>")
            .field("trend_window", &self.trend_window)
            .field("load_timeout", &self.load_timeout)
            .finish()
    }
}

impl DayCollector {
    /// Create collector over a loader
    pub fn new(loader: Arc<dyn DayLoader>, trend_window: usize) -> Self {
        Self {
            loader,
            trend_window,
            load_timeout: None,
        }
    }

    /// Bound each per-date load
    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Trailing window used for the trend line
    #[must_use]
    pub const fn trend_window(&self) -> usize {
        self.trend_window
    }

    /// Load and aggregate a single date
    pub async fn collect_day(&self, date: &DateEntry) -> std::result::Result<DailyPoint, LoadError> {
        let load = self.loader.load(&date.value);
        let records = match self.load_timeout {
            Some(after) => tokio::time::timeout(after, load)
                .await
                .map_err(|_| LoadError::Timeout {
                    date: date.value.clone(),
                    after,
                })??,
            None => load.await?,
        };

        Ok(DailyPoint {
            date: date.clone(),
            aggregate: calculate_market_oi(&records),
        })
    }

    /// Load every date concurrently and build the series
    ///
    /// Only an invalid trend window fails; load failures land in
    /// [`MarketSeries::skipped`].
    pub async fn collect(&self, dates: &[DateEntry]) -> Result<MarketSeries> {
        let outcomes = join_all(dates.iter().map(|date| self.collect_day(date))).await;

        let mut series = MarketSeries::default();
        for (date, outcome) in dates.iter().zip(outcomes) {
            match outcome {
                Ok(point) => series.points.push(point),
                Err(e) => {
                    warn!("Skipping {}: {}", date.value, e);
                    series.skipped.push(SkippedDate {
                        date: date.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        series.trend = calculate_trend_line_with_window(&series.net_values(), self.trend_window)?;

        info!(
            "Collected {} of {} dates ({} skipped)",
            series.points.len(),
            dates.len(),
            series.skipped.len()
        );

        Ok(series)
    }
}
