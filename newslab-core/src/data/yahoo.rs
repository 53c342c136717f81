//! Daily bars from the Yahoo Finance v8 chart endpoint.
//!
//! One blocking request per fetch, no retry. The endpoint is unofficial and
//! its payload shape can change without notice; every deviation surfaces as
//! `DataError::ResponseFormatChanged`.

use super::provider::{DataError, DataSource, DateRange, FetchResult, PriceSource};
use crate::domain::Bar;
use chrono::{DateTime, NaiveTime};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CHART_ENDPOINT: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) newslab";
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct Envelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<Series>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Quotes,
}

#[derive(Debug, Deserialize)]
struct Quotes {
    quote: Vec<Columns>,
}

#[derive(Debug, Default, Deserialize)]
struct Columns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

impl Columns {
    /// Bar at `i`, or `None` for a row where every field is null.
    fn row(&self, i: usize, date: chrono::NaiveDate) -> Option<Bar> {
        let (open, high, low, close) = (
            cell(&self.open, i),
            cell(&self.high, i),
            cell(&self.low, i),
            cell(&self.close, i),
        );
        let volume = cell(&self.volume, i);

        if [open, high, low, close].iter().all(Option::is_none) && volume.is_none() {
            return None;
        }

        Some(Bar {
            date,
            open: open.unwrap_or(f64::NAN),
            high: high.unwrap_or(f64::NAN),
            low: low.unwrap_or(f64::NAN),
            close: close.unwrap_or(f64::NAN),
            volume: volume.unwrap_or(0),
        })
    }
}

fn cell<T: Copy>(column: &[Option<T>], i: usize) -> Option<T> {
    column.get(i).copied().flatten()
}

pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map(|client| Self { client })
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))
    }

    fn url(symbol: &str, range: DateRange) -> String {
        let epoch = |d: chrono::NaiveDate| d.and_time(NaiveTime::MIN).and_utc().timestamp();
        format!(
            "{CHART_ENDPOINT}/{symbol}?period1={}&period2={}&interval=1d",
            epoch(range.start),
            epoch(range.end)
        )
    }
}

/// Turn a decoded payload into the bars dated inside `range`.
fn bars_from_chart(symbol: &str, range: DateRange, envelope: Envelope) -> Result<Vec<Bar>, DataError> {
    let no_data = || DataError::NoData {
        symbol: symbol.to_string(),
    };

    let series = match (envelope.chart.result, envelope.chart.error) {
        (Some(results), _) => results
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("empty result list".into()))?,
        (None, Some(err)) if err.code == "Not Found" => {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
        }
        (None, Some(err)) => {
            return Err(DataError::ResponseFormatChanged(format!(
                "{}: {}",
                err.code, err.description
            )))
        }
        (None, None) => {
            return Err(DataError::ResponseFormatChanged(
                "neither result nor error present".into(),
            ))
        }
    };

    // A window with no sessions comes back without timestamps.
    if series.timestamp.is_empty() {
        return Err(no_data());
    }

    let columns = series
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::ResponseFormatChanged("quote block missing".into()))?;

    let mut bars = Vec::with_capacity(series.timestamp.len());
    for (i, &ts) in series.timestamp.iter().enumerate() {
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("bad timestamp {ts}")))?
            .date_naive();
        if !range.contains(date) {
            continue;
        }
        bars.extend(columns.row(i, date));
    }

    if bars.is_empty() {
        Err(no_data())
    } else {
        Ok(bars)
    }
}

impl PriceSource for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, range: DateRange) -> Result<FetchResult, DataError> {
        let url = Self::url(symbol, range);
        debug!(%url, "requesting chart");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            }
            status if !status.is_success() => {
                return Err(DataError::Http {
                    status: status.as_u16(),
                    symbol: symbol.to_string(),
                })
            }
            _ => {}
        }

        let body = response
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| DataError::ResponseFormatChanged(format!("{symbol}: {e}")))?;

        let bars = bars_from_chart(symbol, range, envelope)?;
        debug!(symbol, bars = bars.len(), "chart decoded");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::YahooFinance,
        })
    }
}
