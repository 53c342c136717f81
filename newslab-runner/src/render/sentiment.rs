//! Two-panel sentiment chart: price against daily sentiment, and a
//! sentiment-vs-return scatter with a least-squares fit.

use super::{
    caption_style, configure_mesh, date_label, draw_err, draw_gappy_line, draw_legend, label_style,
    value_bounds, RenderError,
};
use crate::theme::ChartTheme;
use newslab_core::sentiment::{Correlation, CorrelationResult, MergedRow};
use plotters::coord::Shift;
use plotters::prelude::*;

#[derive(Debug, Clone)]
pub struct SentimentChart {
    pub symbol: String,
    pub rows: Vec<MergedRow>,
    pub correlation: Correlation,
}

impl SentimentChart {
    pub fn new(symbol: impl Into<String>, result: &CorrelationResult) -> Self {
        Self {
            symbol: symbol.into(),
            rows: result.joined.clone(),
            correlation: result.correlation,
        }
    }

    /// (sentiment, daily return) points of the scatter panel.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.daily_return.map(|r| (row.sentiment, r)))
            .collect()
    }

    pub fn scatter_title(&self) -> String {
        match self.correlation.value() {
            Some(r) => format!("Sentiment vs Returns (Correlation: {r:.2})"),
            None => "Sentiment vs Returns (Correlation: undefined)".to_string(),
        }
    }
}

/// Ordinary least squares `(slope, intercept)`; `None` without x spread.
pub fn fit_line(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

pub(super) fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &SentimentChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let panels = root.split_evenly((2, 1));
    draw_price_panel(&panels[0], chart, theme)?;
    draw_scatter_panel(&panels[1], chart, theme)
}

fn draw_price_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &SentimentChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let dates: Vec<_> = chart.rows.iter().map(|r| r.date).collect();
    let closes: Vec<f64> = chart.rows.iter().map(|r| r.close).collect();
    let sentiment: Vec<f64> = chart.rows.iter().map(|r| r.sentiment).collect();
    let x_max = dates.len().saturating_sub(1).max(1) as f64;
    let x_fmt = |x: &f64| date_label(&dates, *x);

    let (lo, hi) = value_bounds([&closes[..]])
        .ok_or_else(|| RenderError::EmptySeries(format!("{} close", chart.symbol)))?;
    let (s_lo, s_hi) = value_bounds([&sentiment[..]]).unwrap_or((-1.0, 1.0));

    let mut price = ChartBuilder::on(area)
        .caption(format!("{} Stock Price vs News Sentiment", chart.symbol), caption_style(theme))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(-0.5..x_max + 0.5, lo..hi)
        .map_err(draw_err)?
        .set_secondary_coord(-0.5..x_max + 0.5, s_lo.min(0.0)..s_hi.max(0.0));

    configure_mesh(&mut *price, theme, &x_fmt, "Date", "Stock Price")?;
    price
        .configure_secondary_axes()
        .axis_style(theme.text)
        .label_style(label_style(theme))
        .y_desc("Sentiment Score")
        .draw()
        .map_err(draw_err)?;

    draw_gappy_line(&mut *price, &closes, theme.series_color(5), "Stock Price")?;
    price
        .draw_secondary_series(sentiment.iter().enumerate().map(|(i, &s)| {
            Rectangle::new(
                [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, s)],
                theme.sign_color(s).mix(0.5).filled(),
            )
        }))
        .map_err(draw_err)?;
    price
        .draw_secondary_series(LineSeries::new(
            vec![(-0.5, 0.0), (x_max + 0.5, 0.0)],
            theme.guide.stroke_width(1),
        ))
        .map_err(draw_err)?;
    draw_legend(&mut *price, theme)
}

fn draw_scatter_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &SentimentChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let points = chart.points();
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x_lo, x_hi) = value_bounds([&xs[..]]).unwrap_or((-1.0, 1.0));
    let (y_lo, y_hi) = value_bounds([&ys[..]]).unwrap_or((-1.0, 1.0));
    let (x_lo, x_hi) = (x_lo.min(0.0), x_hi.max(0.0));
    let (y_lo, y_hi) = (y_lo.min(0.0), y_hi.max(0.0));
    let x_fmt = |x: &f64| format!("{x:.2}");

    let mut scatter = ChartBuilder::on(area)
        .caption(chart.scatter_title(), caption_style(theme))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(draw_err)?;
    configure_mesh(&mut scatter, theme, &x_fmt, "Sentiment Score", "Daily Return (%)")?;

    let guide = theme.guide.mix(0.6).stroke_width(1);
    scatter
        .draw_series(LineSeries::new(vec![(x_lo, 0.0), (x_hi, 0.0)], guide))
        .map_err(draw_err)?;
    scatter
        .draw_series(LineSeries::new(vec![(0.0, y_lo), (0.0, y_hi)], guide))
        .map_err(draw_err)?;

    let dot = theme.series_color(5).mix(0.6).filled();
    scatter
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, dot)))
        .map_err(draw_err)?;

    if let Some((slope, intercept)) = fit_line(&points) {
        let fit_color = theme.series_color(0);
        scatter
            .draw_series(LineSeries::new(
                vec![(x_lo, intercept + slope * x_lo), (x_hi, intercept + slope * x_hi)],
                fit_color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label("Least-squares fit")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], fit_color.stroke_width(2)));
        draw_legend(&mut scatter, theme)?;
    }
    Ok(())
}
