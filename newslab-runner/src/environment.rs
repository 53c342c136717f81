//! Output directory and chart theme setup.

use crate::config::AnalysisConfig;
use crate::theme::ChartTheme;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("output path {0} exists and is not a directory")]
    NotADirectory(String),
}

/// Prepared output location plus the theme charts are drawn with.
#[derive(Debug, Clone)]
pub struct Environment {
    output_dir: PathBuf,
    theme: ChartTheme,
}

impl Environment {
    /// Create the output directory (if missing) and build the theme.
    ///
    /// Safe to call repeatedly.
    pub fn init(config: &AnalysisConfig) -> Result<Self, EnvironmentError> {
        let dir = &config.output_dir;
        if dir.exists() && !dir.is_dir() {
            return Err(EnvironmentError::NotADirectory(dir.display().to_string()));
        }
        std::fs::create_dir_all(dir).map_err(|source| EnvironmentError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
        debug!(output_dir = %dir.display(), palette = ?config.chart.palette, "environment ready");

        Ok(Self {
            output_dir: dir.clone(),
            theme: ChartTheme::from_palette(config.chart.palette),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }
}
