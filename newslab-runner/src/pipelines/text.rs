//! Character-length statistics and histograms for headlines and article bodies.

use super::{skipped, AnalysisContext, AnalysisError, AnalysisOutcome};
use crate::render::{ChartKind, ChartSpec, HistogramChart};
use newslab_core::domain::news::{CONTENT, HEADLINE};
use newslab_core::domain::NewsTable;
use newslab_core::reports::{text_lengths, LengthStats, ReportOutcome};
use tracing::{debug, info};

pub const CHART_SIZE: (u32, u32) = (1000, 500);

/// Headline and content lengths, each column on its own. A missing or empty
/// column only drops its own histogram; the run is skipped when neither
/// produced one.
pub fn run(ctx: &AnalysisContext<'_>, table: &NewsTable) -> Result<AnalysisOutcome, AnalysisError> {
    let mut artifacts = Vec::new();
    let mut first_skip = None;

    for column in [HEADLINE, CONTENT] {
        match analyze_column(ctx, table, column)? {
            ReportOutcome::Ready(path) => artifacts.push(path),
            ReportOutcome::Skipped(reason) => {
                debug!(column, %reason, "no length histogram");
                first_skip.get_or_insert(reason);
            }
        }
    }

    match first_skip {
        Some(reason) if artifacts.is_empty() => Ok(skipped("text analysis", reason)),
        _ => Ok(AnalysisOutcome::Completed { artifacts }),
    }
}

fn analyze_column(
    ctx: &AnalysisContext<'_>,
    table: &NewsTable,
    column: &str,
) -> Result<ReportOutcome<std::path::PathBuf>, AnalysisError> {
    let report = match text_lengths(table, column, ctx.config.histogram_bins) {
        ReportOutcome::Ready(report) => report,
        ReportOutcome::Skipped(reason) => return Ok(ReportOutcome::Skipped(reason)),
    };
    info!(column, rows = report.stats.count, "text lengths computed");

    let title = capitalize(column);
    println!("\n{title} Length Statistics:");
    print_describe(&report.stats);

    let spec = ChartSpec::new(
        column,
        "lengths",
        CHART_SIZE,
        ChartKind::Histogram(HistogramChart {
            title: format!("Distribution of {title} Lengths"),
            x_label: format!("{title} Length (characters)"),
            histogram: report.histogram,
        }),
    );
    Ok(ReportOutcome::Ready(ctx.sink.render(&spec)?))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_describe(stats: &LengthStats) {
    println!("count {:>12.6}", stats.count as f64);
    println!("mean  {:>12.6}", stats.mean);
    match stats.std {
        Some(std) => println!("std   {std:>12.6}"),
        None => println!("std   {:>12}", "NaN"),
    }
    println!("min   {:>12.6}", stats.min);
    println!("25%   {:>12.6}", stats.q25);
    println!("50%   {:>12.6}", stats.median);
    println!("75%   {:>12.6}", stats.q75);
    println!("max   {:>12.6}", stats.max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pipelines::testing::RecordingSink;
    use chrono::NaiveDate;
    use newslab_core::data::InMemorySource;
    use newslab_core::domain::news::DATE;
    use newslab_core::reports::SkipReason;

    fn run_with(table: &NewsTable, sink: &RecordingSink) -> AnalysisOutcome {
        let config = AnalysisConfig::default();
        let prices = InMemorySource::new("AAPL", vec![]);
        let ctx = AnalysisContext {
            config: &config,
            sink,
            prices: &prices,
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            range: None,
        };
        run(&ctx, table).unwrap()
    }

    #[test]
    fn headline_only_dataset_renders_one_histogram() {
        let table =
            NewsTable::from_columns(vec![(HEADLINE, vec![Some("short"), Some("a bit longer"), None])])
                .unwrap();
        let sink = RecordingSink::default();

        let outcome = run_with(&table, &sink);

        assert_eq!(outcome.artifacts().len(), 1);
        assert_eq!(sink.file_names(), vec!["headline_lengths.png"]);
        let specs = sink.specs.borrow();
        match &specs[0].kind {
            ChartKind::Histogram(chart) => {
                assert_eq!(chart.title, "Distribution of Headline Lengths");
                assert_eq!(chart.histogram.total(), 2);
                assert_eq!(chart.histogram.counts.len(), 30);
            }
            other => panic!("unexpected chart {other:?}"),
        };
    }

    #[test]
    fn content_column_adds_second_histogram() {
        let table = NewsTable::from_columns(vec![
            (HEADLINE, vec![Some("one"), Some("two")]),
            (CONTENT, vec![Some("body text"), Some("more body text")]),
        ])
        .unwrap();
        let sink = RecordingSink::default();

        let outcome = run_with(&table, &sink);

        assert_eq!(outcome.artifacts().len(), 2);
        assert_eq!(sink.file_names(), vec!["headline_lengths.png", "content_lengths.png"]);
    }

    #[test]
    fn content_only_dataset_still_renders() {
        let table =
            NewsTable::from_columns(vec![(CONTENT, vec![Some("body"), Some("a longer body")])]).unwrap();
        let sink = RecordingSink::default();

        let outcome = run_with(&table, &sink);

        assert_eq!(outcome.artifacts().len(), 1);
        assert_eq!(sink.file_names(), vec!["content_lengths.png"]);
    }

    #[test]
    fn no_text_columns_is_skipped() {
        let table = NewsTable::from_columns(vec![(DATE, vec![Some("2024-01-02")])]).unwrap();
        let sink = RecordingSink::default();

        let outcome = run_with(&table, &sink);

        assert_eq!(
            outcome,
            AnalysisOutcome::Skipped(SkipReason::MissingColumn(HEADLINE.to_string()))
        );
        assert!(sink.specs.borrow().is_empty());
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("headline"), "Headline");
        assert_eq!(capitalize(""), "");
    }
}
