use chrono::{Duration, NaiveDate};
use newslab_core::data::{DateRange, InMemorySource};
use newslab_core::domain::Bar;
use newslab_core::reports::SkipReason;
use newslab_runner::{
    Analysis, AnalysisConfig, ChartRenderer, ChartSink, ChartSpec, ChartTheme, Orchestrator,
    RenderError, StepStatus,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Records specs and writes a placeholder file so tests can check paths.
#[derive(Clone)]
struct PlaceholderSink {
    dir: PathBuf,
    rendered: Rc<RefCell<Vec<String>>>,
}

impl PlaceholderSink {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            rendered: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ChartSink for PlaceholderSink {
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf, RenderError> {
        let path = self.dir.join(spec.file_name());
        std::fs::write(&path, b"placeholder")?;
        self.rendered.borrow_mut().push(spec.file_name());
        Ok(path)
    }
}

fn bars(start: NaiveDate, n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1;
            Bar {
                date: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10_000 + (i as u64 % 7) * 100,
            }
        })
        .collect()
}

const NEWS: &str = "\
headline,url,publisher,date,stock
Stock surges on record earnings,https://x.test/1,Benzinga Insights,2024-03-04 09:30:00-05:00,AAPL
Shares plunge after weak guidance,https://x.test/2,Lisa Levin,2024-03-05 10:00:00-05:00,AAPL
Analyst upgrades stock to buy,https://x.test/3,Benzinga Insights,2024-03-06 08:00:00,AAPL
Market worries persist,https://x.test/4,Vick Meyer,2024-03-06,AAPL
Company misses estimates,https://x.test/5,Lisa Levin,2024-03-07,AAPL
Strong growth lifts outlook,https://x.test/6,Benzinga Insights,not a date,AAPL
";

fn config(root: &Path, data: &str) -> AnalysisConfig {
    let data_path = root.join("news.csv");
    std::fs::write(&data_path, data).unwrap();
    AnalysisConfig {
        data_path,
        output_dir: root.join("output"),
        ..AnalysisConfig::default()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

#[test]
fn full_run_produces_every_chart() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), NEWS);
    std::fs::create_dir_all(&config.output_dir).unwrap();
    let sink = PlaceholderSink::new(&config.output_dir);
    let prices = InMemorySource::new("AAPL", bars(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), 300));

    let orchestrator =
        Orchestrator::new(config, Box::new(sink.clone()), Box::new(prices)).with_today(today());
    let summary = orchestrator.run(&Analysis::default_sequence(Some("AAPL")));

    assert_eq!(summary.steps.len(), 5);
    for step in &summary.steps {
        assert!(
            matches!(step.status, StepStatus::Completed(_)),
            "{} did not complete: {:?}",
            step.analysis,
            step.status
        );
    }
    assert!(summary.any_succeeded());
    assert_eq!(
        *sink.rendered.borrow(),
        vec![
            "headline_lengths.png",
            "publisher_distribution.png",
            "articles_over_time.png",
            "weekly_pattern.png",
            "AAPL_technical_analysis.png",
            "AAPL_sentiment_analysis.png",
        ]
    );
    for path in summary.artifacts() {
        assert!(path.is_file(), "missing {}", path.display());
    }
}

#[test]
fn failing_analysis_does_not_stop_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), NEWS);
    std::fs::create_dir_all(&config.output_dir).unwrap();
    let sink = PlaceholderSink::new(&config.output_dir);
    let prices = InMemorySource::new("AAPL", bars(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 60));

    let orchestrator =
        Orchestrator::new(config, Box::new(sink.clone()), Box::new(prices)).with_today(today());
    let summary = orchestrator.run(&[
        Analysis::Financial {
            symbol: "NOPE".into(),
        },
        Analysis::Publishers,
    ]);

    assert!(matches!(summary.steps[0].status, StepStatus::Failed(ref m) if m.contains("NOPE")));
    assert!(matches!(summary.steps[1].status, StepStatus::Completed(_)));
    assert!(summary.any_succeeded());
    assert_eq!(summary.failures().count(), 1);
    assert_eq!(*sink.rendered.borrow(), vec!["publisher_distribution.png"]);
}

#[test]
fn explicit_range_is_used_for_prices() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), NEWS);
    std::fs::create_dir_all(&config.output_dir).unwrap();
    let sink = PlaceholderSink::new(&config.output_dir);
    let prices = InMemorySource::new("AAPL", bars(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 30));

    // the trailing window from `today` has no bars; the explicit one does
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
    );
    let orchestrator = Orchestrator::new(config, Box::new(sink), Box::new(prices))
        .with_today(today())
        .with_range(Some(range));
    let summary = orchestrator.run(&[Analysis::Financial {
        symbol: "AAPL".into(),
    }]);

    assert!(summary.any_succeeded());
}

#[test]
fn empty_dataset_skips_everything_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), "headline,url,publisher,date,stock\n");
    let output_dir = config.output_dir.clone();
    let prices = InMemorySource::new("AAPL", vec![]);

    let orchestrator = Orchestrator::from_config(config, Box::new(prices))
        .unwrap()
        .with_today(today());
    let summary = orchestrator.run(&[
        Analysis::Text,
        Analysis::Publishers,
        Analysis::TimeSeries,
        Analysis::Sentiment {
            symbol: "AAPL".into(),
        },
    ]);

    for step in &summary.steps {
        assert_eq!(step.status, StepStatus::Skipped(SkipReason::NoData), "{}", step.analysis);
    }
    assert!(!summary.any_succeeded());
    assert!(output_dir.is_dir());
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
}

#[test]
fn missing_dataset_fails_each_dependent_step() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AnalysisConfig {
        data_path: tmp.path().join("absent.csv"),
        output_dir: tmp.path().join("output"),
        ..AnalysisConfig::default()
    };
    let prices = InMemorySource::new("AAPL", vec![]);

    let orchestrator = Orchestrator::from_config(config, Box::new(prices)).unwrap();
    let summary = orchestrator.run(&Analysis::default_sequence(None));

    assert_eq!(summary.steps.len(), 3);
    for step in &summary.steps {
        assert!(
            matches!(&step.status, StepStatus::Failed(m) if m.contains("absent.csv")),
            "{:?}",
            step.status
        );
    }
    assert!(!summary.any_succeeded());
}

#[test]
fn renderer_refuses_to_write_into_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), NEWS);
    let renderer = ChartRenderer::new(tmp.path().join("nowhere"), ChartTheme::default());
    let prices = InMemorySource::new("AAPL", vec![]);

    let orchestrator =
        Orchestrator::new(config, Box::new(renderer), Box::new(prices)).with_today(today());
    let summary = orchestrator.run(&[Analysis::Publishers, Analysis::TimeSeries]);

    assert!(summary
        .steps
        .iter()
        .all(|s| matches!(&s.status, StepStatus::Failed(m) if m.starts_with("render error"))));
}

#[test]
#[ignore = "needs system fonts"]
fn real_renderer_writes_pngs() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), NEWS);
    let output_dir = config.output_dir.clone();
    let prices = InMemorySource::new("AAPL", bars(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), 300));

    let orchestrator = Orchestrator::from_config(config, Box::new(prices))
        .unwrap()
        .with_today(today());
    let summary = orchestrator.run(&Analysis::default_sequence(Some("AAPL")));

    assert_eq!(summary.artifacts().len(), 6);
    for path in summary.artifacts() {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG", "{}", path.display());
    }
    let stray: Vec<_> = std::fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.contains("partial"))
        .collect();
    assert!(stray.is_empty(), "temporary files left: {stray:?}");
}
