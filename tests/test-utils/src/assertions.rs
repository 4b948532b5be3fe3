//! Custom assertions for testing

use market_oi::DayAggregate;

/// Tolerance used by the OI assertions
pub const OI_TOLERANCE: f64 = 1e-6;

/// Assert that two floating point values are approximately equal
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "Values not approximately equal: {} != {} (diff: {}, tolerance: {})",
        left,
        right,
        diff,
        tolerance
    );
}

/// Assert an aggregate's OI figures and counts
pub fn assert_aggregate(
    actual: &DayAggregate,
    buy_oi: f64,
    sell_oi: f64,
    filtered_symbols: usize,
    total_symbols: usize,
) {
    assert_approx_eq(actual.buy_oi, buy_oi, OI_TOLERANCE);
    assert_approx_eq(actual.sell_oi, sell_oi, OI_TOLERANCE);
    assert_approx_eq(actual.net_oi, buy_oi + sell_oi, OI_TOLERANCE);
    assert_eq!(actual.filtered_symbols, filtered_symbols, "filtered symbols");
    assert_eq!(actual.total_symbols, total_symbols, "total symbols");
}

/// Assert the aggregate's structural invariants
pub fn assert_aggregate_invariants(actual: &DayAggregate, record_count: usize) {
    assert_eq!(actual.total_symbols, record_count, "total symbols");
    assert!(
        actual.filtered_symbols <= actual.total_symbols,
        "filtered {} exceeds total {}",
        actual.filtered_symbols,
        actual.total_symbols
    );
    assert_eq!(
        actual.net_oi,
        actual.buy_oi + actual.sell_oi,
        "net OI must be exactly buy + sell"
    );
}

/// Assert two series are element-wise approximately equal
pub fn assert_series_approx_eq(left: &[f64], right: &[f64], tolerance: f64) {
    assert_eq!(left.len(), right.len(), "series lengths differ");
    for (l, r) in left.iter().zip(right) {
        assert_approx_eq(*l, *r, tolerance);
    }
}
