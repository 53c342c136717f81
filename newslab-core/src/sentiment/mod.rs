//! Headline sentiment: per-text polarity, daily aggregation, correlation
//! with price returns.

pub mod aggregate;
pub mod correlation;
pub mod lexicon;

pub use aggregate::{DailySentiment, SentimentAggregation};
pub use correlation::{correlate, Correlation, CorrelationResult, MergedRow, UndefinedReason};
pub use lexicon::LexiconModel;

use crate::data::DataError;
use crate::domain::NewsTable;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("required column '{0}' not found")]
    MissingColumn(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// A text → polarity model. Output is expected in [-1, 1].
pub trait PolarityModel: Send + Sync {
    fn name(&self) -> &str;

    fn polarity(&self, text: &str) -> f64;
}

/// Scores texts with a polarity model and aggregates them per day.
pub struct SentimentEngine {
    model: Box<dyn PolarityModel>,
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::new(Box::new(LexiconModel::new()))
    }
}

impl SentimentEngine {
    pub fn new(model: Box<dyn PolarityModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Polarity of a single text. Missing or blank text scores exactly 0.
    pub fn score(&self, text: Option<&str>) -> f64 {
        match text {
            Some(t) if !t.trim().is_empty() => {
                let p = self.model.polarity(t);
                if p.is_nan() {
                    0.0
                } else {
                    p.clamp(-1.0, 1.0)
                }
            }
            _ => 0.0,
        }
    }

    /// Mean headline polarity per calendar day.
    pub fn aggregate(&self, table: &NewsTable) -> Result<SentimentAggregation, SentimentError> {
        aggregate::aggregate_daily(self, table)
    }

    /// Daily sentiment from a CSV file in one step.
    pub fn aggregate_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<SentimentAggregation, SentimentError> {
        let table = NewsTable::from_csv(path)?;
        self.aggregate(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl PolarityModel for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn blank_and_missing_text_score_zero() {
        let engine = SentimentEngine::new(Box::new(Fixed(0.9)));
        assert_eq!(engine.score(None), 0.0);
        assert_eq!(engine.score(Some("")), 0.0);
        assert_eq!(engine.score(Some("   \t")), 0.0);
        assert_eq!(engine.score(Some("anything")), 0.9);
    }

    #[test]
    fn model_output_is_clamped() {
        assert_eq!(SentimentEngine::new(Box::new(Fixed(4.0))).score(Some("x")), 1.0);
        assert_eq!(SentimentEngine::new(Box::new(Fixed(-4.0))).score(Some("x")), -1.0);
        assert_eq!(SentimentEngine::new(Box::new(Fixed(f64::NAN))).score(Some("x")), 0.0);
    }

    #[test]
    fn default_engine_uses_lexicon() {
        let engine = SentimentEngine::default();
        assert_eq!(engine.model_name(), "lexicon");
        assert!(engine.score(Some("Shares soar after upgrade")) > 0.0);
    }

    #[test]
    fn aggregate_file_reports_missing_file() {
        let err = SentimentEngine::default()
            .aggregate_file("/nonexistent/news.csv")
            .unwrap_err();
        assert!(matches!(err, SentimentError::Data(DataError::FileNotFound(_))));
    }
}
