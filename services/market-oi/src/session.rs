//! Caller-owned selection state
//!
//! A session is opened when a date is selected and replaced wholesale on the
//! next selection. Nothing is shared between sessions.

use crate::collector::DayCollector;
use crate::error::LoadError;
use crate::report::MarketReport;
use crate::types::{DateEntry, DayAggregate};
use tracing::info;

/// Aggregate and report for the currently selected date
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSession {
    date: DateEntry,
    aggregate: DayAggregate,
    report: MarketReport,
}

impl MarketSession {
    /// Load the selected date and build its session
    pub async fn open(collector: &DayCollector, date: DateEntry) -> Result<Self, LoadError> {
        let point = collector.collect_day(&date).await?;
        info!("Selected {} ({})", point.date.label, point.date.value);

        let report = MarketReport::from_aggregate(&point.date, &point.aggregate);
        Ok(Self {
            date: point.date,
            aggregate: point.aggregate,
            report,
        })
    }

    /// Switch to another date, keeping `self` if the new date fails to load
    pub async fn select(self, collector: &DayCollector, date: DateEntry) -> (Self, Option<LoadError>) {
        match Self::open(collector, date).await {
            Ok(next) => (next, None),
            Err(e) => (self, Some(e)),
        }
    }

    /// Selected date
    #[must_use]
    pub const fn date(&self) -> &DateEntry {
        &self.date
    }

    /// Aggregate of the selected date
    #[must_use]
    pub const fn aggregate(&self) -> &DayAggregate {
        &self.aggregate
    }

    /// Display statistics of the selected date
    #[must_use]
    pub const fn report(&self) -> &MarketReport {
        &self.report
    }
}
