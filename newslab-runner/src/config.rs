//! Analysis configuration, loaded from TOML with every field defaulted.

use crate::theme::Palette;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Chart canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 2000,
            palette: Palette::Husl,
        }
    }
}

/// Everything the pipelines need to know besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// News dataset (CSV with a header row).
    pub data_path: PathBuf,
    /// Where charts are written.
    pub output_dir: PathBuf,
    pub default_symbol: String,
    /// Calendar days of price history for the financial analysis.
    pub lookback_days: i64,
    pub top_publishers: usize,
    pub histogram_bins: usize,
    pub chart: ChartConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/raw_analyst_ratings.csv"),
            output_dir: PathBuf::from("output"),
            default_symbol: "AAPL".to_string(),
            lookback_days: 365,
            top_publishers: 10,
            histogram_bins: 30,
            chart: ChartConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_days <= 0 {
            return Err(ConfigError::Invalid("lookback_days must be positive".into()));
        }
        if self.top_publishers == 0 {
            return Err(ConfigError::Invalid("top_publishers must be at least 1".into()));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid("histogram_bins must be at least 1".into()));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ConfigError::Invalid("chart width and height must be non-zero".into()));
        }
        if self.default_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("default_symbol must not be empty".into()));
        }
        Ok(())
    }
}
