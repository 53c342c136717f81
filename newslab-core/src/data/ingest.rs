//! Ingest: delimited news datasets into `NewsTable`, fetched bars into `PriceSeries`.

use super::provider::{DataError, DateRange, PriceSource};
use crate::domain::{Bar, NewsTable, PriceSeries};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read a CSV dataset, keeping every column as text.
pub fn load_news_csv(path: &Path) -> Result<NewsTable, DataError> {
    if !path.is_file() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }

    let frame = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| DataError::Parse(format!("{}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded dataset"
    );

    Ok(NewsTable::from_frame(frame))
}

/// Drop void bars, sort and de-duplicate by date.
///
/// Fails with `NoData` when nothing usable remains.
pub fn ingest(symbol: &str, bars: Vec<Bar>) -> Result<PriceSeries, DataError> {
    let total = bars.len();
    let kept: Vec<Bar> = bars.into_iter().filter(|b| !b.close.is_nan()).collect();

    if kept.len() < total {
        warn!(symbol, dropped = total - kept.len(), "dropped bars without a close");
    }
    if kept.is_empty() {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
        });
    }

    Ok(PriceSeries::new(symbol, kept))
}

/// Fetch from a source and ingest in one step.
pub fn load_prices(
    source: &dyn PriceSource,
    symbol: &str,
    range: DateRange,
) -> Result<PriceSeries, DataError> {
    debug!(
        source = source.name(),
        symbol,
        start = %range.start,
        end = %range.end,
        "fetching prices"
    );
    let fetched = source.fetch(symbol, range)?;
    ingest(&fetched.symbol, fetched.bars)
}
