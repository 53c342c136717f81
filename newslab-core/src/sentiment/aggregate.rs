//! Per-day mean sentiment over a news table.

use super::{SentimentEngine, SentimentError};
use crate::data::parse_column;
use crate::domain::news::{DATE, HEADLINE};
use crate::domain::NewsTable;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Mean polarity of the headlines published on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub sentiment: f64,
    pub articles: usize,
}

/// Daily sentiment rows plus what was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentAggregation {
    /// Sorted by date; only days with at least one headline appear.
    pub daily: Vec<DailySentiment>,
    /// Headlines that contributed a score.
    pub scored: usize,
    /// Rows dropped because the date was missing or unparseable.
    pub dropped: usize,
}

impl SentimentAggregation {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.daily.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.daily.last().map(|d| d.date)
    }

    /// Mean of the daily means.
    pub fn mean_sentiment(&self) -> Option<f64> {
        if self.daily.is_empty() {
            return None;
        }
        Some(self.daily.iter().map(|d| d.sentiment).sum::<f64>() / self.daily.len() as f64)
    }
}

pub(super) fn aggregate_daily(
    engine: &SentimentEngine,
    table: &NewsTable,
) -> Result<SentimentAggregation, SentimentError> {
    let headlines = table
        .text_column(HEADLINE)
        .ok_or_else(|| SentimentError::MissingColumn(HEADLINE.to_string()))?;
    let dates = table
        .text_column(DATE)
        .ok_or_else(|| SentimentError::MissingColumn(DATE.to_string()))?;

    let outcome = parse_column(&dates);
    if outcome.dropped > 0 {
        warn!(dropped = outcome.dropped, "dropped rows with unparseable dates");
    }

    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for &(row, timestamp) in &outcome.parsed {
        let score = engine.score(headlines[row].as_deref());
        let entry = by_day.entry(timestamp.date()).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let daily: Vec<DailySentiment> = by_day
        .into_iter()
        .map(|(date, (sum, n))| DailySentiment {
            date,
            sentiment: sum / n as f64,
            articles: n,
        })
        .collect();

    debug!(days = daily.len(), scored = outcome.parsed.len(), "aggregated daily sentiment");

    Ok(SentimentAggregation {
        daily,
        scored: outcome.parsed.len(),
        dropped: outcome.dropped,
    })
}
