//! Runs named analyses in sequence over one dataset.
//!
//! A failing analysis is logged, printed and recorded; the run continues
//! with the next one. The news dataset is read at most once per run, and
//! only if some analysis needs it.

use crate::config::AnalysisConfig;
use crate::environment::{Environment, EnvironmentError};
use crate::pipelines::{
    financial, publishers, sentiment, text, time_series, AnalysisContext, AnalysisError,
    AnalysisOutcome,
};
use crate::render::{ChartRenderer, ChartSink};
use chrono::NaiveDate;
use newslab_core::data::{DateRange, PriceSource};
use newslab_core::domain::NewsTable;
use newslab_core::reports::SkipReason;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One analysis the orchestrator can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Financial { symbol: String },
    Sentiment { symbol: String },
    Text,
    Publishers,
    TimeSeries,
}

impl Analysis {
    /// Text, publishers and time series; financial and sentiment are
    /// appended when a symbol is given.
    pub fn default_sequence(symbol: Option<&str>) -> Vec<Analysis> {
        let mut seq = vec![Analysis::Text, Analysis::Publishers, Analysis::TimeSeries];
        if let Some(symbol) = symbol {
            seq.push(Analysis::Financial {
                symbol: symbol.to_string(),
            });
            seq.push(Analysis::Sentiment {
                symbol: symbol.to_string(),
            });
        }
        seq
    }

    /// Financial and sentiment read a price source; the rest only the news dataset.
    pub fn needs_prices(&self) -> bool {
        matches!(self, Analysis::Financial { .. } | Analysis::Sentiment { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Analysis::Financial { .. } => "financial",
            Analysis::Sentiment { .. } => "sentiment",
            Analysis::Text => "text",
            Analysis::Publishers => "publisher",
            Analysis::TimeSeries => "time series",
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Analysis::Financial { symbol } | Analysis::Sentiment { symbol } => {
                write!(f, "{} ({symbol})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Completed(Vec<PathBuf>),
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub analysis: Analysis,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub steps: Vec<StepReport>,
}

impl RunSummary {
    /// True if at least one analysis completed.
    pub fn any_succeeded(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s.status, StepStatus::Completed(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|s| matches!(s.status, StepStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&StepStatus) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.status)).count()
    }

    /// Last line printed by a run.
    pub fn closing_line(&self, output_dir: &Path) -> String {
        let completed = self.count(|s| matches!(s, StepStatus::Completed(_)));
        let skipped = self.count(|s| matches!(s, StepStatus::Skipped(_)));
        let failed = self.count(|s| matches!(s, StepStatus::Failed(_)));
        let location = format!("Check the '{}' directory for results.", output_dir.display());

        if completed == self.steps.len() {
            format!("All analyses completed! {location}")
        } else if completed == 0 {
            format!("No analysis completed ({skipped} skipped, {failed} failed).")
        } else {
            format!(
                "{completed} of {} analyses completed ({skipped} skipped, {failed} failed). {location}",
                self.steps.len()
            )
        }
    }

    /// Every chart written during the run, in order.
    pub fn artifacts(&self) -> Vec<&PathBuf> {
        self.steps
            .iter()
            .filter_map(|s| match &s.status {
                StepStatus::Completed(paths) => Some(paths),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

pub struct Orchestrator {
    config: AnalysisConfig,
    sink: Box<dyn ChartSink>,
    prices: Box<dyn PriceSource>,
    today: NaiveDate,
    range: Option<DateRange>,
}

impl Orchestrator {
    pub fn new(config: AnalysisConfig, sink: Box<dyn ChartSink>, prices: Box<dyn PriceSource>) -> Self {
        Self {
            config,
            sink,
            prices,
            today: chrono::Local::now().date_naive(),
            range: None,
        }
    }

    /// Prepare the output directory and render charts there.
    pub fn from_config(
        config: AnalysisConfig,
        prices: Box<dyn PriceSource>,
    ) -> Result<Self, EnvironmentError> {
        let env = Environment::init(&config)?;
        let sink = Box::new(ChartRenderer::from_environment(&env));
        Ok(Self::new(config, sink, prices))
    }

    /// Reference date for trailing price windows.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fixed price window for financial and sentiment analyses.
    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.range = range;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, analyses: &[Analysis]) -> RunSummary {
        let ctx = AnalysisContext {
            config: &self.config,
            sink: self.sink.as_ref(),
            prices: self.prices.as_ref(),
            today: self.today,
            range: self.range,
        };
        let mut dataset: Option<Result<NewsTable, String>> = None;
        let mut summary = RunSummary::default();

        for (i, analysis) in analyses.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("Running {} analysis...", analysis.name());
            info!(analysis = %analysis, "analysis started");

            let result = match analysis {
                Analysis::Financial { symbol } => {
                    financial::run(&ctx, symbol).map_err(|e| e.to_string())
                }
                Analysis::Sentiment { symbol } => self.on_dataset(&mut dataset, |table| {
                    sentiment::run(&ctx, table, symbol)
                }),
                Analysis::Text => self.on_dataset(&mut dataset, |table| text::run(&ctx, table)),
                Analysis::Publishers => {
                    self.on_dataset(&mut dataset, |table| publishers::run(&ctx, table))
                }
                Analysis::TimeSeries => {
                    self.on_dataset(&mut dataset, |table| time_series::run(&ctx, table))
                }
            };

            let status = match result {
                Ok(AnalysisOutcome::Completed { artifacts }) => {
                    info!(analysis = %analysis, charts = artifacts.len(), "analysis finished");
                    StepStatus::Completed(artifacts)
                }
                Ok(AnalysisOutcome::Skipped(reason)) => StepStatus::Skipped(reason),
                Err(message) => {
                    error!(analysis = %analysis, error = %message, "analysis failed");
                    println!("Error in {analysis} analysis: {message}");
                    StepStatus::Failed(message)
                }
            };
            summary.steps.push(StepReport {
                analysis: analysis.clone(),
                status,
            });
        }

        println!("\n{}", summary.closing_line(&self.config.output_dir));
        summary
    }

    /// Run an analysis over the news dataset, loading it on first use.
    fn on_dataset(
        &self,
        cache: &mut Option<Result<NewsTable, String>>,
        analysis: impl FnOnce(&NewsTable) -> Result<AnalysisOutcome, AnalysisError>,
    ) -> Result<AnalysisOutcome, String> {
        let table = cache
            .get_or_insert_with(|| {
                NewsTable::from_csv(&self.config.data_path).map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(Clone::clone)?;
        analysis(table).map_err(|e| e.to_string())
    }
}
