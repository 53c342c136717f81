//! Descriptive reports over a news table: publisher counts, text lengths,
//! article counts over time.
//!
//! Reporters never fail. A missing column or an empty dataset yields
//! `ReportOutcome::Skipped` with the reason, and the caller moves on.

pub mod publishers;
pub mod text_length;
pub mod time_series;

pub use publishers::{publisher_counts, PublisherReport};
pub use text_length::{text_lengths, Histogram, LengthStats, TextLengthReport, DEFAULT_BINS};
pub use time_series::{time_series, DailyCount, TimeSeriesReport};

use std::fmt;

/// Why a report was not produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingColumn(String),
    NoData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingColumn(name) => write!(f, "no '{name}' column found in the dataset"),
            SkipReason::NoData => write!(f, "no data to analyze"),
        }
    }
}

/// Result of a reporter: the report, or an explicit skip.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome<T> {
    Ready(T),
    Skipped(SkipReason),
}

impl<T> ReportOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReportOutcome::Ready(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ReportOutcome::Skipped(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            ReportOutcome::Ready(t) => Some(t),
            ReportOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            ReportOutcome::Ready(_) => None,
            ReportOutcome::Skipped(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReportOutcome<U> {
        match self {
            ReportOutcome::Ready(t) => ReportOutcome::Ready(f(t)),
            ReportOutcome::Skipped(reason) => ReportOutcome::Skipped(reason),
        }
    }
}

/// Shared precondition for reporters reading one text column.
pub(crate) fn require_column(
    table: &crate::domain::NewsTable,
    column: &str,
) -> Result<Vec<Option<String>>, SkipReason> {
    if table.is_empty() {
        return Err(SkipReason::NoData);
    }
    table
        .text_column(column)
        .ok_or_else(|| SkipReason::MissingColumn(column.to_string()))
}
