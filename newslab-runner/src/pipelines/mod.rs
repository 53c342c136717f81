//! The five analyses. Each one loads what it needs, computes, prints a
//! human summary to stdout and hands its charts to a `ChartSink`.
//!
//! Missing columns and empty datasets are not errors: the analysis returns
//! `AnalysisOutcome::Skipped` and the run moves on.

pub mod financial;
pub mod publishers;
pub mod sentiment;
pub mod text;
pub mod time_series;

use crate::config::AnalysisConfig;
use crate::render::{ChartSink, RenderError};
use chrono::NaiveDate;
use newslab_core::data::{DataError, DateRange, PriceSource};
use newslab_core::reports::SkipReason;
use newslab_core::sentiment::SentimentError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// What an analysis produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Charts written, in the order they were rendered.
    Completed { artifacts: Vec<PathBuf> },
    Skipped(SkipReason),
}

impl AnalysisOutcome {
    pub fn artifacts(&self) -> &[PathBuf] {
        match self {
            AnalysisOutcome::Completed { artifacts } => artifacts,
            AnalysisOutcome::Skipped(_) => &[],
        }
    }
}

/// Shared inputs of every analysis.
pub struct AnalysisContext<'a> {
    pub config: &'a AnalysisConfig,
    pub sink: &'a dyn ChartSink,
    pub prices: &'a dyn PriceSource,
    /// Reference date for trailing price windows.
    pub today: NaiveDate,
    /// Explicit price window; overrides the trailing lookback when set.
    pub range: Option<DateRange>,
}

impl AnalysisContext<'_> {
    /// The window the financial analysis downloads.
    pub fn price_range(&self) -> DateRange {
        self.range
            .unwrap_or_else(|| DateRange::trailing(self.today, self.config.lookback_days))
    }
}

/// Print the console notice for a skipped analysis.
pub(crate) fn skipped(what: &str, reason: SkipReason) -> AnalysisOutcome {
    tracing::warn!(analysis = what, %reason, "analysis skipped");
    println!("Skipping {what}: {reason}");
    AnalysisOutcome::Skipped(reason)
}


#[cfg(test)]
mod tests {
    use super::*;
    use newslab_core::data::InMemorySource;
    use testing::RecordingSink;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn trailing_window_by_default() {
        let config = AnalysisConfig::default();
        let sink = RecordingSink::default();
        let prices = InMemorySource::new("AAPL", vec![]);
        let ctx = AnalysisContext {
            config: &config,
            sink: &sink,
            prices: &prices,
            today: d(2024, 6, 1),
            range: None,
        };
        assert_eq!(ctx.price_range(), DateRange::trailing(d(2024, 6, 1), 365));

        let explicit = DateRange::new(d(2020, 1, 1), d(2021, 1, 1));
        let ctx = AnalysisContext {
            range: Some(explicit),
            ..ctx
        };
        assert_eq!(ctx.price_range(), explicit);
    }

    #[test]
    fn skipped_outcome_has_no_artifacts() {
        assert!(AnalysisOutcome::Skipped(SkipReason::NoData).artifacts().is_empty());
        let done = AnalysisOutcome::Completed {
            artifacts: vec![PathBuf::from("a.png")],
        };
        assert_eq!(done.artifacts().len(), 1);
    }
}
