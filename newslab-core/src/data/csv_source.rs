//! Offline price source reading a `Date,Open,High,Low,Close,Volume` CSV export.

use super::dates::parse_date;
use super::provider::{DataError, DataSource, DateRange, FetchResult, PriceSource};
use crate::domain::Bar;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(rename = "Date", alias = "date")]
    date: String,
    #[serde(rename = "Open", alias = "open")]
    open: f64,
    #[serde(rename = "High", alias = "high")]
    high: f64,
    #[serde(rename = "Low", alias = "low")]
    low: f64,
    #[serde(rename = "Close", alias = "close")]
    close: f64,
    #[serde(rename = "Volume", alias = "volume")]
    volume: f64,
}

/// Price source backed by a CSV file holding a single symbol's history.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_bars(&self) -> Result<Vec<Bar>, DataError> {
        if !self.path.is_file() {
            return Err(DataError::FileNotFound(self.path.display().to_string()));
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| DataError::Parse(format!("{}: {e}", self.path.display())))?;

        let mut bars = Vec::new();
        for (line, record) in reader.deserialize::<PriceRecord>().enumerate() {
            let record = record
                .map_err(|e| DataError::Parse(format!("{}: {e}", self.path.display())))?;
            let date = parse_date(&record.date).ok_or_else(|| {
                DataError::Parse(format!(
                    "{}: row {}: invalid date '{}'",
                    self.path.display(),
                    line + 1,
                    record.date
                ))
            })?;
            bars.push(Bar {
                date,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume.max(0.0) as u64,
            });
        }
        Ok(bars)
    }
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(&self, symbol: &str, range: DateRange) -> Result<FetchResult, DataError> {
        let bars: Vec<Bar> = self
            .read_bars()?
            .into_iter()
            .filter(|b| range.contains(b.date))
            .collect();

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}
