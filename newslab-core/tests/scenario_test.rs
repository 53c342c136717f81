//! End-to-end scenarios over the reporters and the sentiment engine.

use chrono::{NaiveDate, Weekday};
use newslab_core::data::{load_news_csv, load_prices, CsvPriceSource, DateRange};
use newslab_core::domain::news::{CONTENT, DATE, HEADLINE, PUBLISHER};
use newslab_core::domain::NewsTable;
use newslab_core::indicators::IndicatorEngine;
use newslab_core::reports::{
    publisher_counts, text_lengths, time_series, ReportOutcome, SkipReason, DEFAULT_BINS,
};
use newslab_core::sentiment::{correlate, Correlation, LexiconModel, PolarityModel, SentimentEngine};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn two_headlines_same_day_average() {
    let table = NewsTable::from_columns(vec![
        (HEADLINE, vec![Some("Stock surges on earnings"), Some("Market worries persist")]),
        (DATE, vec![Some("2024-01-01"), Some("2024-01-01")]),
    ])
    .unwrap();

    let model = LexiconModel::new();
    let up = model.polarity("Stock surges on earnings");
    let down = model.polarity("Market worries persist");
    assert!(up > 0.0);
    assert!(down < 0.0);

    let agg = SentimentEngine::default().aggregate(&table).unwrap();
    assert_eq!(agg.daily.len(), 1);
    assert_eq!(agg.daily[0].date, ymd(2024, 1, 1));
    assert_eq!(agg.daily[0].articles, 2);
    assert!((agg.daily[0].sentiment - (up + down) / 2.0).abs() < 1e-12);
}

#[test]
fn publishers_top_two_keep_first_seen_tie_order() {
    let mut publishers = Vec::new();
    // interleave so A is seen before B, both before C
    for _ in 0..3 {
        publishers.extend([Some("A"), Some("B"), Some("C")]);
    }
    publishers.extend([Some("A"), Some("B"), Some("A"), Some("B")]);
    let table = NewsTable::from_columns(vec![(PUBLISHER, publishers)]).unwrap();

    let report = publisher_counts(&table, 2).ready().unwrap();
    assert_eq!(report.top, vec![("A".to_string(), 5), ("B".to_string(), 5)]);
    assert_eq!(report.unique_publishers, 3);
    assert_eq!(report.total_articles, 13);
}

#[test]
fn monday_and_wednesday_only() {
    // 2024-01-01 Monday, 2024-01-03 Wednesday, 2024-01-15 Monday
    let table = NewsTable::from_columns(vec![(
        DATE,
        vec![Some("2024-01-01 09:00:00"), Some("2024-01-03"), Some("01/15/2024")],
    )])
    .unwrap();

    let report = time_series(&table, DATE).ready().unwrap();
    let expected = [
        (Weekday::Mon, Some(2)),
        (Weekday::Tue, None),
        (Weekday::Wed, Some(1)),
        (Weekday::Thu, None),
        (Weekday::Fri, None),
        (Weekday::Sat, None),
        (Weekday::Sun, None),
    ];
    assert_eq!(report.weekday, expected);
    assert_eq!(report.daily.len(), 15);
}

#[test]
fn empty_table_skips_every_reporter() {
    let table = NewsTable::from_columns(vec![
        (HEADLINE, vec![]),
        (PUBLISHER, vec![]),
        (DATE, vec![]),
        (CONTENT, vec![]),
    ])
    .unwrap();

    assert_eq!(publisher_counts(&table, 10), ReportOutcome::Skipped(SkipReason::NoData));
    assert_eq!(
        text_lengths(&table, HEADLINE, DEFAULT_BINS),
        ReportOutcome::Skipped(SkipReason::NoData)
    );
    assert_eq!(
        text_lengths(&table, CONTENT, DEFAULT_BINS),
        ReportOutcome::Skipped(SkipReason::NoData)
    );
    assert_eq!(time_series(&table, DATE), ReportOutcome::Skipped(SkipReason::NoData));
}

#[test]
fn fixture_reports() {
    let table = load_news_csv(&fixture("news_sample.csv")).unwrap();

    let publishers = publisher_counts(&table, 10).ready().unwrap();
    assert_eq!(publishers.top[0], ("Benzinga Insights".to_string(), 2));
    assert_eq!(publishers.top[1], ("Lisa Levin".to_string(), 2));
    assert_eq!(publishers.unique_publishers, 4);

    let headlines = text_lengths(&table, HEADLINE, DEFAULT_BINS).ready().unwrap();
    assert_eq!(headlines.stats.count, 6);
    assert!(text_lengths(&table, CONTENT, DEFAULT_BINS).is_skipped());

    let series = time_series(&table, DATE).ready().unwrap();
    assert_eq!(series.parsed, 5);
    assert_eq!(series.dropped, 1);
    assert_eq!(series.daily.first().map(|d| d.date), Some(ymd(2020, 5, 22)));
    assert_eq!(series.daily.last().map(|d| d.date), Some(ymd(2020, 6, 5)));
    assert_eq!(series.daily.len(), 15);
    assert_eq!(series.weekday[4], (Weekday::Fri, Some(3)));
}

#[test]
fn fixture_sentiment_against_prices() {
    let table = load_news_csv(&fixture("news_sample.csv")).unwrap();
    let agg = SentimentEngine::default().aggregate(&table).unwrap();
    assert_eq!(agg.dropped, 1);
    assert_eq!(agg.daily.len(), 4);

    let first = agg.first_date().unwrap();
    let last = agg.last_date().unwrap();
    let range = DateRange::new(first - chrono::Duration::days(1), last + chrono::Duration::days(1));
    let prices = load_prices(&CsvPriceSource::new(fixture("prices_sample.csv")), "A", range).unwrap();
    let enriched = IndicatorEngine::standard().enrich(prices);

    let result = correlate(&agg.daily, &enriched);
    // every news day is a trading day in the fixture
    assert_eq!(result.joined.len(), 4);
    assert!(result.joined.iter().all(|r| r.daily_return.is_some()));
    assert!(matches!(result.correlation, Correlation::Value(r) if (-1.0..=1.0).contains(&r)));
}
