//! Article counts per calendar day and per weekday.

use super::{require_column, ReportOutcome, SkipReason};
use crate::data::parse_column;
use crate::domain::NewsTable;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;
use tracing::warn;

/// Monday through Sunday.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesReport {
    /// Every calendar day from the first to the last date; days without
    /// articles count 0.
    pub daily: Vec<DailyCount>,
    /// Monday→Sunday; a weekday with no articles at all is `None`.
    pub weekday: [(Weekday, Option<usize>); 7],
    pub parsed: usize,
    pub dropped: usize,
}

impl TimeSeriesReport {
    pub fn busiest_day(&self) -> Option<DailyCount> {
        // max_by_key returns the last maximum; iterate reversed to keep the earliest
        self.daily.iter().rev().max_by_key(|d| d.count).copied()
    }

    pub fn busiest_weekday(&self) -> Option<(Weekday, usize)> {
        self.weekday
            .iter()
            .rev()
            .filter_map(|&(day, n)| n.map(|n| (day, n)))
            .max_by_key(|&(_, n)| n)
    }
}

/// Parse `date_column` leniently and count articles over time.
pub fn time_series(table: &NewsTable, date_column: &str) -> ReportOutcome<TimeSeriesReport> {
    let values = match require_column(table, date_column) {
        Ok(v) => v,
        Err(reason) => return ReportOutcome::Skipped(reason),
    };

    let outcome = parse_column(&values);
    if outcome.dropped > 0 {
        warn!(
            column = date_column,
            dropped = outcome.dropped,
            "rows had invalid dates and were dropped"
        );
    }

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for (_, ts) in &outcome.parsed {
        *per_day.entry(ts.date()).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (per_day.keys().next(), per_day.keys().next_back()) else {
        return ReportOutcome::Skipped(SkipReason::NoData);
    };

    let daily: Vec<DailyCount> = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| DailyCount {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect();

    let mut by_weekday = [0usize; 7];
    for (date, n) in &per_day {
        by_weekday[date.weekday().num_days_from_monday() as usize] += n;
    }
    let weekday = WEEK.map(|day| {
        let n = by_weekday[day.num_days_from_monday() as usize];
        (day, (n > 0).then_some(n))
    });

    ReportOutcome::Ready(TimeSeriesReport {
        daily,
        weekday,
        parsed: outcome.parsed.len(),
        dropped: outcome.dropped,
    })
}
