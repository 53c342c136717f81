//! PNG chart rendering.
//!
//! Every chart is described by a `ChartSpec` (what to draw plus the file
//! name) and handed to a `ChartSink`. `ChartRenderer` is the plotters-backed
//! sink: it draws into a temporary sibling file and renames it over the
//! target only after the image was fully encoded, so a failed render never
//! leaves a truncated PNG in place of a good one.

mod basic;
mod sentiment;
mod technical;

pub use basic::{BarChart, HistogramChart, LineChart};
pub use sentiment::SentimentChart;
pub use technical::TechnicalChart;

use crate::environment::Environment;
use crate::theme::ChartTheme;
use chrono::NaiveDate;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("nothing to plot for {0}")]
    EmptySeries(String),
}

pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// The drawable content of a chart.
#[derive(Debug, Clone)]
pub enum ChartKind {
    Technical(TechnicalChart),
    Sentiment(SentimentChart),
    Bar(BarChart),
    Histogram(HistogramChart),
    Line(LineChart),
}

impl ChartKind {
    fn is_empty(&self) -> bool {
        match self {
            ChartKind::Technical(c) => c.dates.is_empty(),
            ChartKind::Sentiment(c) => c.rows.is_empty(),
            ChartKind::Bar(c) => c.categories.is_empty(),
            ChartKind::Histogram(c) => c.histogram.counts.is_empty(),
            ChartKind::Line(c) => c.dates.is_empty(),
        }
    }
}

/// A chart plus where it goes: `{label}_{report}.png` in the output directory.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub label: String,
    pub report: String,
    /// Canvas size in pixels.
    pub size: (u32, u32),
    pub kind: ChartKind,
}

impl ChartSpec {
    pub fn new(label: impl Into<String>, report: impl Into<String>, size: (u32, u32), kind: ChartKind) -> Self {
        Self {
            label: label.into(),
            report: report.into(),
            size,
            kind,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.label, self.report)
    }
}

/// Anything that can turn a `ChartSpec` into a file.
pub trait ChartSink {
    /// Write the chart and return the final path.
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf, RenderError>;
}

/// Plotters bitmap renderer writing into one output directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    theme: ChartTheme,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, theme: ChartTheme) -> Self {
        Self {
            output_dir: output_dir.into(),
            theme,
        }
    }

    pub fn from_environment(env: &Environment) -> Self {
        Self::new(env.output_dir(), env.theme().clone())
    }

    pub fn target_path(&self, spec: &ChartSpec) -> PathBuf {
        self.output_dir.join(spec.file_name())
    }

    fn temp_path(&self, spec: &ChartSpec) -> PathBuf {
        // keeps the .png extension so the encoder is chosen correctly
        self.output_dir
            .join(format!(".{}_{}.partial.png", spec.label, spec.report))
    }

    fn draw(&self, spec: &ChartSpec, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, spec.size).into_drawing_area();
        root.fill(&self.theme.background).map_err(draw_err)?;

        match &spec.kind {
            ChartKind::Technical(chart) => technical::draw(&root, chart, &self.theme)?,
            ChartKind::Sentiment(chart) => sentiment::draw(&root, chart, &self.theme)?,
            ChartKind::Bar(chart) => basic::draw_bar(&root, chart, &self.theme)?,
            ChartKind::Histogram(chart) => basic::draw_histogram(&root, chart, &self.theme)?,
            ChartKind::Line(chart) => basic::draw_line(&root, chart, &self.theme)?,
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

impl ChartSink for ChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf, RenderError> {
        if spec.kind.is_empty() {
            return Err(RenderError::EmptySeries(spec.file_name()));
        }
        if !self.output_dir.is_dir() {
            return Err(RenderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {} does not exist", self.output_dir.display()),
            )));
        }

        let target = self.target_path(spec);
        let temp = self.temp_path(spec);
        debug!(path = %temp.display(), "rendering chart");

        if let Err(e) = self.draw(spec, &temp) {
            let _ = std::fs::remove_file(&temp);
            return Err(e);
        }
        if let Err(e) = std::fs::rename(&temp, &target) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        info!(path = %target.display(), "saved chart");
        Ok(target)
    }
}

// ── Shared drawing helpers ───────────────────────────────────────────

pub(crate) type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub(crate) fn caption_style(theme: &ChartTheme) -> TextStyle<'static> {
    ("sans-serif", 24).into_font().color(&theme.text)
}

pub(crate) fn label_style(theme: &ChartTheme) -> TextStyle<'static> {
    ("sans-serif", 14).into_font().color(&theme.text)
}

/// Finite (min, max) of several series, padded by 5%; `None` if all NaN.
pub(crate) fn value_bounds<'s>(series: impl IntoIterator<Item = &'s [f64]>) -> Option<(f64, f64)> {
    let (lo, hi) = series
        .into_iter()
        .flat_map(|s| s.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return None;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.05 };
    Some((lo - pad, hi + pad))
}

/// Contiguous runs of non-NaN values as `(x, y)` points, x = row index.
pub(crate) fn segments(values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (i, &v) in values.iter().enumerate() {
        if v.is_finite() {
            current.push((i as f64, v));
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Draw one possibly-gappy series as a labelled line.
pub(crate) fn draw_gappy_line<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    values: &[f64],
    color: RGBColor,
    label: &str,
) -> Result<(), RenderError> {
    let mut labelled = false;
    for segment in segments(values) {
        let anno = chart
            .draw_series(LineSeries::new(segment, color.stroke_width(2)))
            .map_err(draw_err)?;
        if !labelled {
            anno.label(label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
            labelled = true;
        }
    }
    Ok(())
}

/// Horizontal guide line across the full x range.
pub(crate) fn draw_guide<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    x_max: f64,
    y: f64,
    color: RGBColor,
) -> Result<(), RenderError> {
    chart
        .draw_series(LineSeries::new(vec![(0.0, y), (x_max, y)], color.mix(0.6).stroke_width(1)))
        .map_err(draw_err)?;
    Ok(())
}

/// Date under a row-index x coordinate, blank between rows and off the ends.
pub(crate) fn date_label(dates: &[NaiveDate], x: f64) -> String {
    let i = x.round();
    if i < 0.0 || (x - i).abs() > 1e-6 {
        return String::new();
    }
    dates
        .get(i as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn configure_mesh<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    theme: &ChartTheme,
    x_formatter: &dyn Fn(&f64) -> String,
    x_desc: &str,
    y_desc: &str,
) -> Result<(), RenderError> {
    chart
        .configure_mesh()
        .bold_line_style(theme.grid)
        .light_line_style(theme.grid.mix(0.3))
        .axis_style(theme.text)
        .label_style(label_style(theme))
        .x_labels(8)
        .x_label_formatter(x_formatter)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .map_err(draw_err)
}

pub(crate) fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart2d<'a, DB>,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(theme.background.mix(0.8))
        .border_style(theme.grid)
        .label_font(label_style(theme))
        .draw()
        .map_err(draw_err)
}
