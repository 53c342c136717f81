//! Daily headline sentiment joined with same-day returns for one symbol.

use super::{skipped, AnalysisContext, AnalysisError, AnalysisOutcome};
use crate::render::{ChartKind, ChartSpec, SentimentChart};
use chrono::Duration;
use newslab_core::data::{load_prices, DateRange};
use newslab_core::domain::NewsTable;
use newslab_core::indicators::IndicatorEngine;
use newslab_core::reports::SkipReason;
use newslab_core::sentiment::{correlate, SentimentEngine, SentimentError};
use tracing::info;

pub const CHART_SIZE: (u32, u32) = (1500, 1200);

pub fn run(
    ctx: &AnalysisContext<'_>,
    table: &NewsTable,
    symbol: &str,
) -> Result<AnalysisOutcome, AnalysisError> {
    if table.is_empty() {
        return Ok(skipped("sentiment analysis", SkipReason::NoData));
    }

    let engine = SentimentEngine::default();
    let aggregation = match engine.aggregate(table) {
        Ok(a) => a,
        Err(SentimentError::MissingColumn(name)) => {
            return Ok(skipped("sentiment analysis", SkipReason::MissingColumn(name)))
        }
        Err(e) => return Err(e.into()),
    };
    let (Some(first), Some(last)) = (aggregation.first_date(), aggregation.last_date()) else {
        return Ok(skipped("sentiment analysis", SkipReason::NoData));
    };
    info!(
        symbol,
        model = engine.model_name(),
        days = aggregation.daily.len(),
        scored = aggregation.scored,
        "aggregated headline sentiment"
    );

    let range = ctx
        .range
        .unwrap_or_else(|| DateRange::new(first - Duration::days(1), last + Duration::days(1)));
    let prices = IndicatorEngine::standard().enrich(load_prices(ctx.prices, symbol, range)?);
    let result = correlate(&aggregation.daily, &prices);

    let correlation = match result.correlation.value() {
        Some(r) => format!("{r:.2}"),
        None => result.correlation.to_string(),
    };
    println!("Correlation between news sentiment and stock returns: {correlation}");
    println!(
        "Days with sentiment: {}, joined with prices: {}",
        aggregation.daily.len(),
        result.joined.len()
    );
    if result.joined.is_empty() {
        return Ok(skipped("sentiment analysis", SkipReason::NoData));
    }

    let spec = ChartSpec::new(
        symbol,
        "sentiment_analysis",
        CHART_SIZE,
        ChartKind::Sentiment(SentimentChart::new(symbol, &result)),
    );
    let path = ctx.sink.render(&spec)?;

    Ok(AnalysisOutcome::Completed {
        artifacts: vec![path],
    })
}
