//! Technical indicators and the engine that appends them to a price series.
//!
//! Indicators with several outputs (Bollinger, MACD) register one instance
//! per output column.

pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod indicator;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBand};
pub use engine::{columns, EnrichedSeries, IndicatorEngine, PerformanceSummary};
pub use indicator::{Indicator, IndicatorValues};
pub use macd::{Macd, MacdLine};
pub use returns::{cumulative_returns, daily_returns, drawdowns, max_drawdown, running_max};
pub use rsi::Rsi;
pub use sma::Sma;

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-10;

/// Consecutive daily bars from 2024-01-02 with the given closes. Each bar
/// opens at the previous close and spans one point either side.
#[cfg(test)]
pub(crate) fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    let first = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let opens = closes.first().into_iter().chain(closes).copied();
    first
        .iter_days()
        .zip(opens.zip(closes))
        .map(|(date, (open, &close))| crate::domain::Bar {
            date,
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 1_000,
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "expected {expected}, got {actual} (off by {diff}, tolerance {epsilon})"
    );
}
