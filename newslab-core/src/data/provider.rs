//! The `PriceSource` seam, its error type, and the date window it is asked for.

use crate::domain::Bar;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("unknown symbol {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("dataset not found: {0}")]
    FileNotFound(String),

    #[error("could not parse {0}")]
    Parse(String),

    #[error("unexpected response: {0}")]
    ResponseFormatChanged(String),

    #[error("request for {symbol} failed with HTTP {status}")]
    Http { status: u16, symbol: String },

    #[error("network error: {0}")]
    NetworkUnreachable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Calendar window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `days` calendar days back from `today`, which itself is excluded.
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        Self::new(today - Duration::days(days), today)
    }

    /// The default price window: 365 days up to `today`.
    pub fn trailing_year(today: NaiveDate) -> Self {
        Self::trailing(today, 365)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..self.end).contains(&date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    InMemory,
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<Bar>,
    pub source: DataSource,
}

/// Anything that can hand out daily bars for a ticker.
pub trait PriceSource {
    fn name(&self) -> &str;

    /// Bars for `symbol` dated inside `range`. Implementations report an
    /// empty window as `DataError::NoData` rather than an empty `Ok`.
    fn fetch(&self, symbol: &str, range: DateRange) -> Result<FetchResult, DataError>;
}

/// Fixed bars for one ticker, used in tests and offline runs.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    symbol: String,
    bars: Vec<Bar>,
}

impl InMemorySource {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    fn serves(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }
}

impl PriceSource for InMemorySource {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn fetch(&self, symbol: &str, range: DateRange) -> Result<FetchResult, DataError> {
        let bars: Vec<Bar> = self
            .bars
            .iter()
            .filter(|b| self.serves(symbol) && range.contains(b.date))
            .cloned()
            .collect();

        if bars.is_empty() {
            Err(DataError::NoData {
                symbol: symbol.to_string(),
            })
        } else {
            Ok(FetchResult {
                symbol: symbol.to_string(),
                bars,
                source: DataSource::InMemory,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    fn flat(date: NaiveDate) -> Bar {
        Bar {
            date,
            open: 5.0,
            high: 5.0,
            low: 5.0,
            close: 5.0,
            volume: 10,
        }
    }

    fn source() -> InMemorySource {
        InMemorySource::new("TSLA", vec![flat(day(3, 1)), flat(day(3, 8)), flat(day(4, 3))])
    }

    #[test]
    fn trailing_window_excludes_today() {
        let range = DateRange::trailing(day(3, 31), 30);
        assert_eq!(range.start, day(3, 1));
        assert!(range.contains(day(3, 1)));
        assert!(range.contains(day(3, 30)));
        assert!(!range.contains(day(3, 31)));

        let year = DateRange::trailing_year(day(3, 31));
        assert_eq!(year.start, NaiveDate::from_ymd_opt(2022, 3, 31).unwrap());
    }

    #[test]
    fn in_memory_serves_the_requested_window() {
        let fetched = source()
            .fetch("tsla", DateRange::new(day(3, 1), day(4, 1)))
            .unwrap();
        assert_eq!(fetched.bars.len(), 2);
        assert_eq!(fetched.symbol, "tsla");
        assert_eq!(fetched.source, DataSource::InMemory);
    }

    #[test]
    fn empty_window_or_other_symbol_is_no_data() {
        let err = source()
            .fetch("TSLA", DateRange::new(day(5, 1), day(6, 1)))
            .unwrap_err();
        assert_eq!(err.to_string(), "no price data for TSLA");

        let err = source()
            .fetch("NVDA", DateRange::new(day(3, 1), day(4, 1)))
            .unwrap_err();
        assert!(matches!(err, DataError::NoData { symbol } if symbol == "NVDA"));
    }
}
