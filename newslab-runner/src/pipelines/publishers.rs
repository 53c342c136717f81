//! Top publishers by article count.

use super::{skipped, AnalysisContext, AnalysisError, AnalysisOutcome};
use crate::render::{BarChart, ChartKind, ChartSpec};
use newslab_core::domain::NewsTable;
use newslab_core::reports::{publisher_counts, ReportOutcome};
use tracing::info;

pub const CHART_SIZE: (u32, u32) = (1200, 600);

pub fn run(ctx: &AnalysisContext<'_>, table: &NewsTable) -> Result<AnalysisOutcome, AnalysisError> {
    let top_n = ctx.config.top_publishers;
    let report = match publisher_counts(table, top_n) {
        ReportOutcome::Ready(report) => report,
        ReportOutcome::Skipped(reason) => return Ok(skipped("publisher analysis", reason)),
    };
    info!(
        publishers = report.unique_publishers,
        articles = report.total_articles,
        "publisher counts computed"
    );

    println!("\n=== Publisher Statistics ===");
    println!("Total unique publishers: {}", report.unique_publishers);
    println!("\nTop publishers by article count:");
    let width = report.top.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    for (name, count) in &report.top {
        println!("{name:<width$}  {count:>8}");
    }

    let (categories, values): (Vec<String>, Vec<f64>) = report
        .top
        .iter()
        .map(|(name, count)| (name.clone(), *count as f64))
        .unzip();
    let spec = ChartSpec::new(
        "publisher",
        "distribution",
        CHART_SIZE,
        ChartKind::Bar(BarChart {
            title: format!("Top {top_n} Publishers by Number of Articles"),
            x_label: "Publisher".to_string(),
            y_label: "Number of Articles".to_string(),
            categories,
            values,
        }),
    );
    let path = ctx.sink.render(&spec)?;

    Ok(AnalysisOutcome::Completed {
        artifacts: vec![path],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pipelines::testing::RecordingSink;
    use chrono::NaiveDate;
    use newslab_core::data::InMemorySource;
    use newslab_core::domain::news::{HEADLINE, PUBLISHER};
    use newslab_core::reports::SkipReason;

    fn run_with(table: &NewsTable, top: usize, sink: &RecordingSink) -> AnalysisOutcome {
        let config = AnalysisConfig {
            top_publishers: top,
            ..AnalysisConfig::default()
        };
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
    fn bars_follow_report_order() {
        let table = NewsTable::from_columns(vec![(
            PUBLISHER,
            vec![Some("B"), Some("A"), Some("A"), Some("C"), Some("B"), Some("A")],
        )])
        .unwrap();
        let sink = RecordingSink::default();

        let outcome = run_with(&table, 2, &sink);

        assert_eq!(outcome.artifacts().len(), 1);
        assert_eq!(sink.file_names(), vec!["publisher_distribution.png"]);
        let specs = sink.specs.borrow();
        match &specs[0].kind {
            ChartKind::Bar(chart) => {
                assert_eq!(chart.title, "Top 2 Publishers by Number of Articles");
                assert_eq!(chart.categories, vec!["A", "B"]);
                assert_eq!(chart.values, vec![3.0, 2.0]);
            }
            other => panic!("unexpected chart {other:?}"),
        };
    }

    #[test]
    fn no_publisher_column_is_skipped() {
        let table = NewsTable::from_columns(vec![(HEADLINE, vec![Some("x")])]).unwrap();
        let sink = RecordingSink::default();

        let outcome = run_with(&table, 10, &sink);

        assert_eq!(
            outcome,
            AnalysisOutcome::Skipped(SkipReason::MissingColumn(PUBLISHER.to_string()))
        );
        assert!(sink.specs.borrow().is_empty());
    }
}
