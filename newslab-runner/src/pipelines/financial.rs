//! Price history, technical indicators and performance metrics for one symbol.

use super::{AnalysisContext, AnalysisError, AnalysisOutcome};
use crate::render::{ChartKind, ChartSpec, TechnicalChart};
use newslab_core::data::load_prices;
use newslab_core::indicators::{columns, EnrichedSeries, IndicatorEngine};
use tracing::info;

/// Rows shown in the closing table.
const TAIL_ROWS: usize = 5;

pub fn run(ctx: &AnalysisContext<'_>, symbol: &str) -> Result<AnalysisOutcome, AnalysisError> {
    let range = ctx.price_range();
    info!(symbol, start = %range.start, end = %range.end, "financial analysis");
    println!("Downloading {symbol} data from {} to {}...", range.start, range.end);

    let series = load_prices(ctx.prices, symbol, range)?;
    let enriched = IndicatorEngine::standard().enrich(series);

    print_summary(&enriched);

    let spec = ChartSpec::new(
        enriched.symbol(),
        "technical_analysis",
        (ctx.config.chart.width, ctx.config.chart.height),
        ChartKind::Technical(TechnicalChart::from_enriched(&enriched)),
    );
    let path = ctx.sink.render(&spec)?;

    println!("\nAnalysis complete! Results saved to {}", path.display());
    print_tail(&enriched, TAIL_ROWS);

    Ok(AnalysisOutcome::Completed {
        artifacts: vec![path],
    })
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn print_summary(enriched: &EnrichedSeries) {
    let Some(summary) = enriched.summary() else {
        return;
    };
    println!("\n=== {} Analysis ===", enriched.symbol());
    println!("Analysis Period: {} to {}", summary.start, summary.end);
    println!("Total Return: {}%", fmt_opt(summary.total_return_pct, 2));
    println!("Max Drawdown: {}%", fmt_opt(summary.max_drawdown_pct, 2));
    println!("Current RSI: {}", fmt_opt(summary.current_rsi, 2));
}

fn print_tail(enriched: &EnrichedSeries, rows: usize) {
    println!("\nLast {rows} rows of the analysis:");
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10} {:>8}",
        "Date", "Open", "High", "Low", "Close", "Volume", "SMA_20", "RSI"
    );
    let start = enriched.len().saturating_sub(rows);
    for (i, bar) in enriched.bars().iter().enumerate().skip(start) {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>10} {:>8}",
            bar.date.to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            fmt_opt(enriched.value(columns::SMA_20, i), 2),
            fmt_opt(enriched.value(columns::RSI_14, i), 2),
        );
    }
}
