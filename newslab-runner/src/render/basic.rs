//! Single-panel charts: categorical bars, length histograms, daily lines.

use super::{
    caption_style, configure_mesh, date_label, draw_err, draw_gappy_line, label_style, RenderError,
};
use crate::theme::ChartTheme;
use chrono::NaiveDate;
use newslab_core::reports;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Vertical bars over named categories. A NaN value leaves its slot empty.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub histogram: reports::Histogram,
}

/// One value per calendar day.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub y_label: String,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

fn upper_bound(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

pub(super) fn draw_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &BarChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let n = chart.categories.len();
    let y_max = upper_bound(chart.values.iter().copied());
    let x_fmt = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => chart.categories.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, caption_style(theme))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .bold_line_style(theme.grid)
        .light_line_style(theme.grid.mix(0.3))
        .axis_style(theme.text)
        .label_style(label_style(theme))
        .x_labels(n)
        .x_label_formatter(&x_fmt)
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()
        .map_err(draw_err)?;

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(theme.series_color(5).filled())
            .margin(8)
            .data(
                chart
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, &v)| (i, v)),
            ),
    )
    .map_err(draw_err)?;
    Ok(())
}

pub(super) fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &HistogramChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let hist = &chart.histogram;
    let (lo, hi) = match (hist.edges.first(), hist.edges.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        _ => return Err(RenderError::EmptySeries(chart.title.clone())),
    };
    let y_max = upper_bound(hist.counts.iter().map(|&c| c as f64));
    let x_fmt = |x: &f64| format!("{x:.0}");

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, caption_style(theme))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(lo..hi, 0.0..y_max)
        .map_err(draw_err)?;
    configure_mesh(&mut ctx, theme, &x_fmt, &chart.x_label, "Count")?;

    let fill = theme.series_color(5).mix(0.8).filled();
    let edge = theme.background.stroke_width(1);
    let bins = || {
        hist.edges
            .windows(2)
            .zip(&hist.counts)
            .filter(|(_, count)| **count > 0)
            .map(|(w, &count)| [(w[0], 0.0), (w[1], count as f64)])
    };
    ctx.draw_series(bins().map(|corners| Rectangle::new(corners, fill)))
        .map_err(draw_err)?;
    ctx.draw_series(bins().map(|corners| Rectangle::new(corners, edge)))
        .map_err(draw_err)?;
    Ok(())
}

pub(super) fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &LineChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let x_max = chart.dates.len().saturating_sub(1).max(1) as f64;
    let y_max = upper_bound(chart.values.iter().copied());
    let x_fmt = |x: &f64| date_label(&chart.dates, *x);

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, caption_style(theme))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(draw_err)?;
    configure_mesh(&mut ctx, theme, &x_fmt, "Date", &chart.y_label)?;
    draw_gappy_line(&mut ctx, &chart.values, theme.series_color(5), &chart.y_label)?;
    Ok(())
}
