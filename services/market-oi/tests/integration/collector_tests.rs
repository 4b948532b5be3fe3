//! Day collector isolation and ordering tests

use anyhow::Result;
use market_oi::{DateEntry, DayCollector, LoadError, MarketSession, SymbolRecord};
use rstest::*;
use std::sync::Arc;
use std::time::Duration;
use test_utils::*;

fn loader_for(dates: &[DateEntry]) -> MockDayLoader {
    let factory = SymbolRecordFactory::new();
    dates.iter().fold(MockDayLoader::new(), |loader, date| {
        loader.with_day(&date.value, factory.build_day(12, 6))
    })
}

#[rstest]
#[tokio::test]
async fn test_all_dates_loaded(trading_dates: Vec<DateEntry>) -> Result<()> {
    let loader = Arc::new(loader_for(&trading_dates));
    let collector = DayCollector::new(loader.clone(), 2);

    let series = collector.collect(&trading_dates).await?;

    assert_eq!(series.len(), 5);
    assert!(series.skipped.is_empty());
    assert_eq!(loader.calls(), 5);
    for (point, date) in series.points.iter().zip(&trading_dates) {
        assert_eq!(&point.date, date);
        assert_aggregate_invariants(&point.aggregate, 18);
        assert_eq!(point.aggregate.filtered_symbols, 12);
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_failed_date_is_isolated(trading_dates: Vec<DateEntry>) -> Result<()> {
    let factory = SymbolRecordFactory::new();
    let days: Vec<(DateEntry, Vec<SymbolRecord>)> = trading_dates
        .iter()
        .map(|d| (d.clone(), factory.build_day(12, 6)))
        .collect();
    let build = || {
        days.iter()
            .fold(MockDayLoader::new(), |loader, (d, records)| {
                loader.with_day(&d.value, records.clone())
            })
    };

    let baseline = DayCollector::new(Arc::new(build()), 2)
        .collect(&trading_dates)
        .await?;
    let series = DayCollector::new(Arc::new(build().with_failure("14040728")), 2)
        .collect(&trading_dates)
        .await?;

    assert_eq!(series.len(), 4);
    assert_eq!(series.skipped.len(), 1);
    assert_eq!(series.skipped[0].date.value, "14040728");

    let kept: Vec<_> = baseline
        .points
        .into_iter()
        .filter(|p| p.date.value != "14040728")
        .collect();
    assert_eq!(series.points, kept);
    Ok(())
}

#[tokio::test]
async fn test_trend_follows_surviving_points() -> Result<()> {
    let loader = MockDayLoader::new()
        .with_day("1", vec![SymbolRecord::new(100.0, 0.0, 0.9, 1.0)])
        .with_day("3", vec![SymbolRecord::new(100.0, 0.0, 0.7, 1.0)])
        .with_day("4", vec![SymbolRecord::new(100.0, 0.0, 0.5, 1.0)]);
    let dates = ["1", "2", "3", "4"].map(DateEntry::from_value);

    let series = DayCollector::new(Arc::new(loader), 2).collect(&dates).await?;

    assert_series_approx_eq(&series.net_values(), &[10.0, 30.0, 50.0], 1e-9);
    assert_series_approx_eq(&series.trend, &[10.0, 20.0, 40.0], 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_order_preserved_when_completion_order_differs() -> Result<()> {
    let loader = MockDayLoader::new()
        .with_day("a", vec![SymbolRecord::new(1.0, 0.0, 0.0, 1.0)])
        .with_day("b", vec![SymbolRecord::new(2.0, 0.0, 0.0, 1.0)])
        .with_day("c", vec![SymbolRecord::new(3.0, 0.0, 0.0, 1.0)])
        .with_delay("a", Duration::from_millis(60))
        .with_delay("b", Duration::from_millis(30));
    let dates = ["a", "b", "c"].map(DateEntry::from_value);

    let series = DayCollector::new(Arc::new(loader), 2).collect(&dates).await?;

    let order: Vec<_> = series.points.iter().map(|p| p.date.value.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_loads_run_concurrently() -> Result<()> {
    let delay = Duration::from_millis(200);
    let dates: Vec<_> = (0..5).map(|i| DateEntry::from_value(i.to_string())).collect();
    let loader = dates.iter().fold(MockDayLoader::new(), |loader, d| {
        loader
            .with_day(&d.value, vec![SymbolRecord::default()])
            .with_delay(&d.value, delay)
    });
    let collector = DayCollector::new(Arc::new(loader), 2);

    // Sequential loading would need a full second.
    let series = with_timeout(Duration::from_millis(800), collector.collect(&dates)).await??;
    assert_eq!(series.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_slow_date_times_out_alone() -> Result<()> {
    init_test_logging();
    let loader = MockDayLoader::new()
        .with_day("fast", vec![SymbolRecord::new(100.0, 50.0, 0.8, 1.3)])
        .with_day("slow", vec![SymbolRecord::new(100.0, 50.0, 0.8, 1.3)])
        .with_delay("slow", Duration::from_secs(5));
    let collector =
        DayCollector::new(Arc::new(loader), 2).with_load_timeout(Duration::from_millis(100));
    let dates = ["fast", "slow"].map(DateEntry::from_value);

    let series = with_timeout(Duration::from_secs(2), collector.collect(&dates)).await??;

    assert_eq!(series.len(), 1);
    assert_eq!(series.points[0].date.value, "fast");
    assert!(series.skipped[0].reason.contains("timed out"));

    let err = collector
        .collect_day(&DateEntry::from_value("slow"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Timeout { .. }));
    Ok(())
}

#[tokio::test]
async fn test_session_replaced_wholesale() -> Result<()> {
    let loader = MockDayLoader::new()
        .with_day("14040729", vec![SymbolRecord::new(100.0, 50.0, 1.5, 0.7)])
        .with_day("14040730", vec![SymbolRecord::new(100.0, 50.0, 0.8, 1.3)]);
    let collector = DayCollector::new(Arc::new(loader), 2);

    let session = MarketSession::open(&collector, DateEntry::from_value("14040729")).await?;
    assert_approx_eq(session.aggregate().net_oi, -80.0, 1e-9);

    let (session, err) = session
        .select(&collector, DateEntry::from_value("14040730"))
        .await;
    assert!(err.is_none());
    assert_eq!(session.date().label, "1404/07/30");
    assert_approx_eq(session.aggregate().net_oi, 50.0, 1e-9);

    let (session, err) = session
        .select(&collector, DateEntry::from_value("14040801"))
        .await;
    assert!(err.is_some());
    assert_eq!(session.date().value, "14040730");
    Ok(())
}
