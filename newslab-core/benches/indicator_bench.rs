//! Criterion benchmarks for NewsLab hot paths.
//!
//! Benchmarks:
//! 1. Indicator enrichment (single indicator vs. the standard stack)
//! 2. Headline sentiment scoring and daily aggregation
//! 3. Mixed-format date parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use newslab_core::data::parse_column;
use newslab_core::domain::news::{DATE, HEADLINE};
use newslab_core::domain::{Bar, NewsTable, PriceSeries};
use newslab_core::indicators::{Indicator, IndicatorEngine, Rsi, Sma};
use newslab_core::sentiment::SentimentEngine;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

const HEADLINES: &[&str] = &[
    "Stocks That Hit 52-Week Highs On Friday",
    "Shares plunge after weak guidance",
    "Agilent Shares Surge, Analysts Upgrade",
    "Market worries persist as investors weigh rate cuts",
    "Company schedules annual meeting",
];

const DATES: &[&str] = &[
    "2020-06-05 10:30:54-04:00",
    "2020-05-22 00:00:00",
    "2020-05-26",
    "05/27/2020 09:15",
    "not a date",
];

fn make_news(n: usize) -> NewsTable {
    let headlines: Vec<Option<&str>> = (0..n).map(|i| Some(HEADLINES[i % HEADLINES.len()])).collect();
    let dates: Vec<Option<&str>> = (0..n).map(|i| Some(DATES[i % DATES.len()])).collect();
    NewsTable::from_columns(vec![(HEADLINE, headlines), (DATE, dates)]).unwrap()
}

// ── 1. Enrichment ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_enrich");

    for &bar_count in &[252, 1260, 2520] {
        let bars = make_bars(bar_count);

        group.bench_with_input(BenchmarkId::new("sma_20", bar_count), &bars, |b, bars| {
            let sma = Sma::new(20);
            b.iter(|| sma.compute(black_box(bars)));
        });

        group.bench_with_input(BenchmarkId::new("rsi_14", bar_count), &bars, |b, bars| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.compute(black_box(bars)));
        });

        let engine = IndicatorEngine::standard();
        group.bench_with_input(BenchmarkId::new("standard", bar_count), &bars, |b, bars| {
            b.iter(|| engine.enrich(PriceSeries::new("BENCH", black_box(bars.clone()))));
        });
    }

    group.finish();
}

// ── 2. Sentiment ─────────────────────────────────────────────────────

fn bench_sentiment(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentiment");
    let engine = SentimentEngine::default();

    group.bench_function("score_headline", |b| {
        b.iter(|| engine.score(black_box(Some(HEADLINES[3]))));
    });

    for &rows in &[1_000, 10_000] {
        let table = make_news(rows);
        group.bench_with_input(BenchmarkId::new("aggregate", rows), &table, |b, table| {
            b.iter(|| engine.aggregate(black_box(table)));
        });
    }

    group.finish();
}

// ── 3. Date parsing ──────────────────────────────────────────────────

fn bench_dates(c: &mut Criterion) {
    let values: Vec<Option<String>> = (0..10_000)
        .map(|i| Some(DATES[i % DATES.len()].to_string()))
        .collect();

    c.bench_function("parse_column_10k", |b| {
        b.iter(|| parse_column(black_box(&values)));
    });
}

criterion_group!(benches, bench_indicators, bench_sentiment, bench_dates);
criterion_main!(benches);
