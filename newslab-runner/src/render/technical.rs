//! Four-panel technical chart: price with moving averages, volume, RSI, MACD.

use super::{
    caption_style, configure_mesh, date_label, draw_err, draw_gappy_line, draw_guide, draw_legend,
    value_bounds, RenderError,
};
use crate::theme::ChartTheme;
use chrono::NaiveDate;
use newslab_core::indicators::{columns, EnrichedSeries};
use plotters::coord::Shift;
use plotters::prelude::*;

/// MACD histogram bars are stretched so they read next to the lines.
pub const HISTOGRAM_SCALE: f64 = 3.0;

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct TechnicalChart {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub sma_20: Vec<f64>,
    pub sma_50: Vec<f64>,
    pub sma_200: Vec<f64>,
    pub volume: Vec<f64>,
    pub volume_ma: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    /// Already multiplied by `HISTOGRAM_SCALE`.
    pub histogram: Vec<f64>,
}

impl TechnicalChart {
    pub fn from_enriched(enriched: &EnrichedSeries) -> Self {
        let column = |name: &str| {
            enriched
                .column(name)
                .map(<[f64]>::to_vec)
                .unwrap_or_else(|| vec![f64::NAN; enriched.len()])
        };

        Self {
            symbol: enriched.symbol().to_string(),
            dates: enriched.dates(),
            close: enriched.series().closes(),
            sma_20: column(columns::SMA_20),
            sma_50: column(columns::SMA_50),
            sma_200: column(columns::SMA_200),
            volume: enriched.bars().iter().map(|b| b.volume as f64).collect(),
            volume_ma: column(columns::VOLUME_SMA_20),
            rsi: column(columns::RSI_14),
            macd: column(columns::MACD),
            signal: column(columns::MACD_SIGNAL),
            histogram: column(columns::MACD_HIST)
                .into_iter()
                .map(|v| v * HISTOGRAM_SCALE)
                .collect(),
        }
    }
}

pub(super) fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &TechnicalChart,
    theme: &ChartTheme,
) -> Result<(), RenderError> {
    let panels = root.split_evenly((4, 1));
    let x_max = chart.dates.len().saturating_sub(1).max(1) as f64;
    let x_fmt = |x: &f64| date_label(&chart.dates, *x);

    // ── Price ────────────────────────────────────────────────────────
    let (lo, hi) = value_bounds([
        &chart.close[..],
        &chart.sma_20[..],
        &chart.sma_50[..],
        &chart.sma_200[..],
    ])
        .ok_or_else(|| RenderError::EmptySeries(format!("{} close", chart.symbol)))?;
    let mut price = ChartBuilder::on(&panels[0])
        .caption(format!("{} Price and Moving Averages", chart.symbol), caption_style(theme))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..x_max + 0.5, lo..hi)
        .map_err(draw_err)?;
    configure_mesh(&mut price, theme, &x_fmt, "Date", "Price")?;
    draw_gappy_line(&mut price, &chart.close, theme.series_color(0), "Close Price")?;
    draw_gappy_line(&mut price, &chart.sma_20, theme.series_color(1), "20-day MA")?;
    draw_gappy_line(&mut price, &chart.sma_50, theme.series_color(2), "50-day MA")?;
    draw_gappy_line(&mut price, &chart.sma_200, theme.series_color(4), "200-day MA")?;
    draw_legend(&mut price, theme)?;

    // ── Volume ───────────────────────────────────────────────────────
    let vol_hi = value_bounds([&chart.volume[..], &chart.volume_ma[..]])
        .map(|(_, hi)| hi)
        .unwrap_or(1.0)
        .max(1.0);
    let mut volume = ChartBuilder::on(&panels[1])
        .caption("Trading Volume", caption_style(theme))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..x_max + 0.5, 0.0..vol_hi)
        .map_err(draw_err)?;
    configure_mesh(&mut volume, theme, &x_fmt, "Date", "Volume")?;
    let bar_style = theme.series_color(0).mix(0.5).filled();
    volume
        .draw_series(
            chart
                .volume
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, &v)| Rectangle::new([(i as f64 - 0.4, 0.0), (i as f64 + 0.4, v)], bar_style)),
        )
        .map_err(draw_err)?
        .label("Volume")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], bar_style));
    draw_gappy_line(&mut volume, &chart.volume_ma, theme.series_color(1), "20-day Volume MA")?;
    draw_legend(&mut volume, theme)?;

    // ── RSI ──────────────────────────────────────────────────────────
    let mut rsi = ChartBuilder::on(&panels[2])
        .caption("Relative Strength Index (RSI)", caption_style(theme))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..x_max + 0.5, 0.0..100.0)
        .map_err(draw_err)?;
    configure_mesh(&mut rsi, theme, &x_fmt, "Date", "RSI")?;
    draw_guide(&mut rsi, x_max, RSI_OVERBOUGHT, theme.negative)?;
    draw_guide(&mut rsi, x_max, RSI_OVERSOLD, theme.positive)?;
    draw_gappy_line(&mut rsi, &chart.rsi, theme.series_color(3), "RSI")?;
    draw_legend(&mut rsi, theme)?;

    // ── MACD ─────────────────────────────────────────────────────────
    let (lo, hi) = value_bounds([&chart.macd[..], &chart.signal[..], &chart.histogram[..]])
        .unwrap_or((-1.0, 1.0));
    let mut macd = ChartBuilder::on(&panels[3])
        .caption("MACD", caption_style(theme))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..x_max + 0.5, lo.min(0.0)..hi.max(0.0))
        .map_err(draw_err)?;
    configure_mesh(&mut macd, theme, &x_fmt, "Date", "MACD")?;
    let hist_style = theme.guide.mix(0.3).filled();
    macd.draw_series(
        chart
            .histogram
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| Rectangle::new([(i as f64 - 0.4, 0.0), (i as f64 + 0.4, v)], hist_style)),
    )
    .map_err(draw_err)?
    .label("Histogram")
    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], hist_style));
    draw_gappy_line(&mut macd, &chart.macd, theme.series_color(5), "MACD")?;
    draw_gappy_line(&mut macd, &chart.signal, theme.series_color(1), "Signal Line")?;
    draw_legend(&mut macd, theme)?;

    Ok(())
}
