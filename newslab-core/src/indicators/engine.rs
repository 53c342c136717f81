//! Indicator engine: appends the standard technical columns to a price series.

use super::bollinger::Bollinger;
use super::indicator::{Indicator, IndicatorValues};
use super::macd::{Macd, MacdLine};
use super::returns::{cumulative_returns, daily_returns, drawdowns, max_drawdown, running_max};
use super::rsi::Rsi;
use super::sma::Sma;
use crate::domain::{Bar, PriceField, PriceSeries};
use chrono::NaiveDate;
use tracing::debug;

/// Column names written by `IndicatorEngine::standard`.
pub mod columns {
    pub const SMA_20: &str = "sma_20";
    pub const SMA_50: &str = "sma_50";
    pub const SMA_200: &str = "sma_200";
    pub const RSI_14: &str = "rsi_14";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HIST: &str = "macd_hist";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";
    pub const VOLUME_SMA_20: &str = "volume_sma_20";
    pub const DAILY_RETURN: &str = "daily_return";
    pub const CUMULATIVE_RETURN: &str = "cumulative_return";
    pub const RUNNING_MAX: &str = "running_max";
    pub const DRAWDOWN: &str = "drawdown";
}

/// A price series plus derived columns, row-aligned with the bars.
#[derive(Debug, Clone)]
pub struct EnrichedSeries {
    series: PriceSeries,
    columns: IndicatorValues,
}

impl EnrichedSeries {
    pub fn symbol(&self) -> &str {
        self.series.symbol()
    }

    pub fn bars(&self) -> &[Bar] {
        self.series.bars()
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn columns(&self) -> &IndicatorValues {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.series.dates()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get_series(name)
    }

    /// Value at a row with null (NaN) as `None`.
    pub fn value(&self, name: &str, row: usize) -> Option<f64> {
        self.columns.value(name, row)
    }

    /// Headline metrics printed after a financial analysis.
    pub fn summary(&self) -> Option<PerformanceSummary> {
        let start = self.series.first_date()?;
        let end = self.series.last_date()?;
        let last = self.len() - 1;

        Some(PerformanceSummary {
            start,
            end,
            last_close: self.bars()[last].close,
            total_return_pct: self
                .value(columns::CUMULATIVE_RETURN, last)
                .map(|r| r * 100.0),
            max_drawdown_pct: self.column(columns::DRAWDOWN).and_then(max_drawdown),
            current_rsi: self.value(columns::RSI_14, last),
        })
    }
}

/// Key metrics of an enriched series.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub last_close: f64,
    pub total_return_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    /// RSI on the last row; `None` while still in warmup.
    pub current_rsi: Option<f64>,
}

/// Computes a fixed set of indicators plus return/drawdown columns.
pub struct IndicatorEngine {
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorEngine {
    /// SMA 20/50/200, RSI(14), MACD(12,26,9), Bollinger(20, 2σ), volume SMA(20).
    pub fn standard() -> Self {
        Self::with_indicators(vec![
            Box::new(Sma::new(20)),
            Box::new(Sma::new(50)),
            Box::new(Sma::new(200)),
            Box::new(Rsi::new(14)),
            Box::new(Macd::standard(MacdLine::Line)),
            Box::new(Macd::standard(MacdLine::Signal)),
            Box::new(Macd::standard(MacdLine::Histogram)),
            Box::new(Bollinger::upper(20, 2.0)),
            Box::new(Bollinger::middle(20, 2.0)),
            Box::new(Bollinger::lower(20, 2.0)),
            Box::new(Sma::of(PriceField::Volume, 20)),
        ])
    }

    pub fn with_indicators(indicators: Vec<Box<dyn Indicator>>) -> Self {
        Self { indicators }
    }

    pub fn indicator_names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    /// Append every indicator column and the return/drawdown columns.
    ///
    /// Rows are never added or removed.
    pub fn enrich(&self, series: PriceSeries) -> EnrichedSeries {
        let mut columns = IndicatorValues::new();
        let bars = series.bars();

        for indicator in &self.indicators {
            let values = indicator.compute(bars);
            debug_assert_eq!(values.len(), bars.len());
            columns.insert(indicator.name(), values);
        }

        let closes = series.closes();
        let daily = daily_returns(&closes);
        let peaks = running_max(&closes);
        columns.insert(columns::CUMULATIVE_RETURN, cumulative_returns(&daily));
        columns.insert(columns::DRAWDOWN, drawdowns(&closes, &peaks));
        columns.insert(columns::DAILY_RETURN, daily);
        columns.insert(columns::RUNNING_MAX, peaks);

        debug!(
            symbol = series.symbol(),
            rows = series.len(),
            columns = columns.len(),
            "enriched price series"
        );

        EnrichedSeries { series, columns }
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::new("TEST", make_bars(closes))
    }

    #[test]
    fn standard_engine_adds_all_columns() {
        let enriched = IndicatorEngine::standard().enrich(series(&[100.0, 101.0, 102.0]));
        for name in [
            columns::SMA_20,
            columns::SMA_50,
            columns::SMA_200,
            columns::RSI_14,
            columns::MACD,
            columns::MACD_SIGNAL,
            columns::MACD_HIST,
            columns::BB_UPPER,
            columns::BB_MIDDLE,
            columns::BB_LOWER,
            columns::VOLUME_SMA_20,
            columns::DAILY_RETURN,
            columns::CUMULATIVE_RETURN,
            columns::RUNNING_MAX,
            columns::DRAWDOWN,
        ] {
            let column = enriched.column(name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(column.len(), 3, "{name} length");
        }
    }

    #[test]
    fn short_history_leaves_indicators_null() {
        let enriched = IndicatorEngine::standard().enrich(series(&[100.0, 101.0, 102.0]));
        assert_eq!(enriched.value(columns::SMA_20, 2), None);
        assert_eq!(enriched.value(columns::RSI_14, 2), None);
        assert_eq!(enriched.value(columns::DAILY_RETURN, 0), None);
        assert_eq!(enriched.value(columns::CUMULATIVE_RETURN, 0), Some(0.0));
    }

    #[test]
    fn summary_reports_key_metrics() {
        let enriched = IndicatorEngine::standard().enrich(series(&[100.0, 120.0, 90.0, 110.0]));
        let summary = enriched.summary().unwrap();
        assert_eq!(summary.start, enriched.dates()[0]);
        assert_eq!(summary.end, enriched.dates()[3]);
        assert_approx(summary.total_return_pct.unwrap(), 10.0, 1e-9);
        assert_approx(summary.max_drawdown_pct.unwrap(), -25.0, 1e-9);
        assert_eq!(summary.current_rsi, None);
        assert_eq!(summary.last_close, 110.0);
    }

    #[test]
    fn empty_series_has_no_summary() {
        let enriched = IndicatorEngine::standard().enrich(PriceSeries::new("TEST", vec![]));
        assert!(enriched.is_empty());
        assert!(enriched.summary().is_none());
    }

    #[test]
    fn custom_indicator_set() {
        let engine = IndicatorEngine::with_indicators(vec![Box::new(Sma::new(2))]);
        assert_eq!(engine.indicator_names(), vec!["sma_2"]);
        let enriched = engine.enrich(series(&[1.0, 3.0]));
        assert_eq!(enriched.value("sma_2", 1), Some(2.0));
        assert!(enriched.column(columns::RSI_14).is_none());
    }
}
