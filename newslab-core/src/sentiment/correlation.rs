//! Join daily sentiment with an enriched price series and correlate it with
//! daily returns.

use super::DailySentiment;
use crate::indicators::{columns, EnrichedSeries};
use chrono::NaiveDate;
use statrs::statistics::Statistics;
use std::fmt;

/// Why a correlation could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedReason {
    /// Fewer than two (sentiment, return) pairs.
    TooFewObservations,
    /// One side is constant.
    ZeroVariance,
}

/// Pearson correlation, or the reason it is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correlation {
    Value(f64),
    Undefined(UndefinedReason),
}

impl Correlation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Value(r) => Some(*r),
            Correlation::Undefined(_) => None,
        }
    }

    /// Pearson r over paired samples.
    pub fn pearson(xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        if xs.len() < 2 {
            return Correlation::Undefined(UndefinedReason::TooFewObservations);
        }
        if is_constant(xs) || is_constant(ys) {
            return Correlation::Undefined(UndefinedReason::ZeroVariance);
        }

        let sx = xs.std_dev();
        let sy = ys.std_dev();
        if sx == 0.0 || sy == 0.0 || sx.is_nan() || sy.is_nan() {
            return Correlation::Undefined(UndefinedReason::ZeroVariance);
        }
        let r = xs.covariance(ys) / (sx * sy);
        Correlation::Value(r.clamp(-1.0, 1.0))
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Value(r) => write!(f, "{r:.3}"),
            Correlation::Undefined(UndefinedReason::TooFewObservations) => {
                write!(f, "undefined (too few observations)")
            }
            Correlation::Undefined(UndefinedReason::ZeroVariance) => {
                write!(f, "undefined (zero variance)")
            }
        }
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// One trading day present in both the sentiment and the price series.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub sentiment: f64,
    pub close: f64,
    /// Null on the first price row.
    pub daily_return: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    pub correlation: Correlation,
    /// Inner join on date, in date order.
    pub joined: Vec<MergedRow>,
}

impl CorrelationResult {
    /// (sentiment, return) pairs that entered the correlation.
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.joined
            .iter()
            .filter_map(|row| row.daily_return.map(|r| (row.sentiment, r)))
            .collect()
    }
}

/// Inner-join daily sentiment with prices and correlate sentiment with
/// same-day returns.
pub fn correlate(daily: &[DailySentiment], prices: &EnrichedSeries) -> CorrelationResult {
    let joined: Vec<MergedRow> = daily
        .iter()
        .filter_map(|day| {
            let row = prices.series().position(day.date)?;
            Some(MergedRow {
                date: day.date,
                sentiment: day.sentiment,
                close: prices.bars()[row].close,
                daily_return: prices.value(columns::DAILY_RETURN, row),
            })
        })
        .collect();

    let (xs, ys): (Vec<f64>, Vec<f64>) = joined
        .iter()
        .filter_map(|row| row.daily_return.map(|r| (row.sentiment, r)))
        .unzip();

    CorrelationResult {
        correlation: Correlation::pearson(&xs, &ys),
        joined,
    }
}
