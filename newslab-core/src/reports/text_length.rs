//! Character-length statistics and histogram for a text column.

use super::{require_column, ReportOutcome, SkipReason};
use crate::domain::NewsTable;
use statrs::statistics::Statistics;

pub const DEFAULT_BINS: usize = 30;

/// Summary statistics in the order `describe()` prints them.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl LengthStats {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let std = values.std_dev();
        Some(Self {
            count: values.len(),
            mean: values.mean(),
            std: (!std.is_nan()).then_some(std),
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Equal-width bins; `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins over `[min, max]` with the last bin closed. A degenerate range
    /// widens to `[min - 0.5, max + 0.5]`.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if values.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLengthReport {
    pub column: String,
    /// Per-row length; null text has a null length.
    pub lengths: Vec<Option<usize>>,
    pub stats: LengthStats,
    pub histogram: Histogram,
}

/// Character counts for `column`, summarized and binned.
pub fn text_lengths(table: &NewsTable, column: &str, bins: usize) -> ReportOutcome<TextLengthReport> {
    let values = match require_column(table, column) {
        Ok(v) => v,
        Err(reason) => return ReportOutcome::Skipped(reason),
    };

    let lengths: Vec<Option<usize>> = values
        .iter()
        .map(|v| v.as_ref().map(|s| s.chars().count()))
        .collect();
    let present: Vec<f64> = lengths.iter().flatten().map(|&n| n as f64).collect();

    let Some(stats) = LengthStats::from_values(&present) else {
        return ReportOutcome::Skipped(SkipReason::NoData);
    };

    ReportOutcome::Ready(TextLengthReport {
        column: column.to_string(),
        histogram: Histogram::from_values(&present, bins),
        lengths,
        stats,
    })
}
