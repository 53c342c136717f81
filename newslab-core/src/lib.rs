//! Computation side of newslab: loading news datasets and daily prices,
//! technical indicators, headline sentiment, and the descriptive reports.
//! Charts and the run sequence live in `newslab-runner`.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod reports;
pub mod sentiment;

#[cfg(test)]
mod tests {
    use super::*;

    fn is_shareable<T: Send + Sync>() {}

    #[test]
    fn results_can_cross_threads() {
        is_shareable::<domain::PriceSeries>();
        is_shareable::<domain::NewsTable>();
        is_shareable::<indicators::EnrichedSeries>();
        is_shareable::<sentiment::SentimentEngine>();
        is_shareable::<reports::TimeSeriesReport>();
    }
}
