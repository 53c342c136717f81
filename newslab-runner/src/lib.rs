//! Analysis pipelines, chart rendering and the run orchestrator for newslab.
//!
//! This crate builds on `newslab-core` to provide:
//! - TOML configuration with defaults for every field
//! - Output-directory setup and chart themes
//! - PNG chart rendering via plotters, written atomically
//! - The five analyses (financial, sentiment, text, publishers, time series)
//! - An orchestrator that runs them in sequence and keeps going past failures

pub mod config;
pub mod environment;
pub mod orchestrator;
pub mod pipelines;
pub mod render;
pub mod theme;

pub use config::{AnalysisConfig, ChartConfig, ConfigError};
pub use environment::{Environment, EnvironmentError};
pub use orchestrator::{Analysis, Orchestrator, RunSummary, StepReport, StepStatus};
pub use pipelines::{AnalysisContext, AnalysisError, AnalysisOutcome};
pub use render::{ChartKind, ChartRenderer, ChartSink, ChartSpec, RenderError};
pub use theme::{ChartTheme, Palette};
