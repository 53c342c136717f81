//! Articles per day over the whole dataset and the weekly publishing pattern.

use super::{skipped, AnalysisContext, AnalysisError, AnalysisOutcome};
use crate::render::{BarChart, ChartKind, ChartSpec, LineChart};
use chrono::Weekday;
use newslab_core::domain::news::DATE;
use newslab_core::domain::NewsTable;
use newslab_core::reports::{time_series, ReportOutcome};
use tracing::info;

pub const LINE_SIZE: (u32, u32) = (1400, 600);
pub const WEEKLY_SIZE: (u32, u32) = (1000, 500);

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn run(ctx: &AnalysisContext<'_>, table: &NewsTable) -> Result<AnalysisOutcome, AnalysisError> {
    let report = match time_series(table, DATE) {
        ReportOutcome::Ready(report) => report,
        ReportOutcome::Skipped(reason) => return Ok(skipped("time series analysis", reason)),
    };
    info!(
        days = report.daily.len(),
        parsed = report.parsed,
        dropped = report.dropped,
        "daily article counts computed"
    );

    if report.dropped > 0 {
        println!(
            "Warning: {} rows had invalid dates and were dropped",
            report.dropped
        );
    }
    if let (Some(first), Some(last)) = (report.daily.first(), report.daily.last()) {
        println!(
            "\nArticles from {} to {}: {} over {} days",
            first.date,
            last.date,
            report.parsed,
            report.daily.len()
        );
    }
    if let Some(busiest) = report.busiest_day() {
        println!("Busiest day: {} ({} articles)", busiest.date, busiest.count);
    }
    if let Some((day, n)) = report.busiest_weekday() {
        println!("Busiest weekday: {} ({n} articles)", weekday_name(day));
    }

    let over_time = ChartSpec::new(
        "articles",
        "over_time",
        LINE_SIZE,
        ChartKind::Line(LineChart {
            title: "Number of Articles Over Time".to_string(),
            y_label: "Number of Articles".to_string(),
            dates: report.daily.iter().map(|d| d.date).collect(),
            values: report.daily.iter().map(|d| d.count as f64).collect(),
        }),
    );
    let weekly = ChartSpec::new(
        "weekly",
        "pattern",
        WEEKLY_SIZE,
        ChartKind::Bar(BarChart {
            title: "Articles by Day of Week".to_string(),
            x_label: "Day of Week".to_string(),
            y_label: "Number of Articles".to_string(),
            categories: report
                .weekday
                .iter()
                .map(|(day, _)| weekday_name(*day).to_string())
                .collect(),
            values: report
                .weekday
                .iter()
                .map(|(_, n)| n.map_or(f64::NAN, |n| n as f64))
                .collect(),
        }),
    );

    let artifacts = vec![ctx.sink.render(&over_time)?, ctx.sink.render(&weekly)?];
    Ok(AnalysisOutcome::Completed { artifacts })
}
