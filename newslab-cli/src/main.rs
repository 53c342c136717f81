//! NewsLab CLI: run the news-dataset and price analyses.
//!
//! Commands:
//! - `financial [SYMBOL]`: price history, indicators, technical chart
//! - `sentiment [SYMBOL]`: headline sentiment against daily returns
//! - `text`: headline/content length statistics
//! - `publishers`: top publishers by article count
//! - `time-series`: articles per day and per weekday
//! - `all`: text, publishers, time series (plus financial and sentiment with `--symbol`)

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use newslab_core::data::{CsvPriceSource, DateRange, InMemorySource, PriceSource, YahooProvider};
use newslab_runner::{Analysis, AnalysisConfig, Orchestrator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "newslab",
    about = "News headline and stock price analyses"
)]
struct Cli {
    /// TOML config file. Every field is optional.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// News dataset (CSV with a header row). Overrides the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Directory charts are written to. Overrides the config.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct PriceArgs {
    /// Start date (YYYY-MM-DD). Defaults to the configured lookback before --end.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD, exclusive). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Read prices from a Date,Open,High,Low,Close,Volume CSV instead of Yahoo Finance.
    #[arg(long)]
    prices: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Technical analysis of a symbol's price history.
    Financial {
        /// Ticker symbol. Defaults to the configured symbol (AAPL).
        symbol: Option<String>,

        #[command(flatten)]
        price: PriceArgs,
    },
    /// Correlate daily headline sentiment with a symbol's returns.
    Sentiment {
        /// Ticker symbol. Defaults to the configured symbol (AAPL).
        symbol: Option<String>,

        #[command(flatten)]
        price: PriceArgs,
    },
    /// Headline and content length statistics.
    Text,
    /// Article counts per publisher.
    Publishers,
    /// Article counts per day and per weekday.
    TimeSeries,
    /// Text, publisher and time-series analyses in sequence.
    All {
        /// Also run the financial and sentiment analyses for this symbol.
        #[arg(long)]
        symbol: Option<String>,

        #[command(flatten)]
        price: PriceArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let today = chrono::Local::now().date_naive();

    let (analyses, price) = match cli.command {
        Commands::Financial { symbol, price } => {
            let symbol = symbol.unwrap_or_else(|| config.default_symbol.clone());
            (vec![Analysis::Financial { symbol }], price)
        }
        Commands::Sentiment { symbol, price } => {
            let symbol = symbol.unwrap_or_else(|| config.default_symbol.clone());
            (vec![Analysis::Sentiment { symbol }], price)
        }
        Commands::Text => (vec![Analysis::Text], PriceArgs::default()),
        Commands::Publishers => (vec![Analysis::Publishers], PriceArgs::default()),
        Commands::TimeSeries => (vec![Analysis::TimeSeries], PriceArgs::default()),
        Commands::All { symbol, price } => (Analysis::default_sequence(symbol.as_deref()), price),
    };

    let range = resolve_range(
        price.start.as_deref(),
        price.end.as_deref(),
        config.lookback_days,
        today,
    )?;
    let source = price_source(price.prices, &analyses)?;

    let orchestrator = Orchestrator::from_config(config, source)?
        .with_today(today)
        .with_range(range);
    let summary = orchestrator.run(&analyses);

    if !summary.any_succeeded() {
        for step in summary.failures() {
            eprintln!("Failed: {}", step.analysis);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

/// The offline CSV when given, Yahoo Finance when an analysis needs prices,
/// otherwise an empty source that is never queried.
fn price_source(prices: Option<PathBuf>, analyses: &[Analysis]) -> Result<Box<dyn PriceSource>> {
    Ok(match prices {
        Some(path) => Box::new(CsvPriceSource::new(path)),
        None if analyses.iter().any(Analysis::needs_prices) => Box::new(YahooProvider::new()?),
        None => Box::new(InMemorySource::new("", Vec::new())),
    })
}

/// `None` when neither bound is given, so each analysis picks its own window.
fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    lookback_days: i64,
    today: NaiveDate,
) -> Result<Option<DateRange>> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }

    let end_date = end
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --end date")?
        .unwrap_or(today);
    let start_date = start
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --start date")?
        .unwrap_or_else(|| DateRange::trailing(end_date, lookback_days).start);

    if start_date >= end_date {
        bail!("--start ({start_date}) must be before --end ({end_date})");
    }
    Ok(Some(DateRange::new(start_date, end_date)))
}
