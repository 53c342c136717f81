//! Data loading: news datasets, price sources, date parsing.

pub mod csv_source;
pub mod dates;
pub mod ingest;
pub mod provider;
pub mod yahoo;

pub use csv_source::CsvPriceSource;
pub use dates::{parse_column, parse_date, parse_datetime, DateParseOutcome};
pub use ingest::{ingest, load_news_csv, load_prices};
pub use provider::{DataError, DataSource, DateRange, FetchResult, InMemorySource, PriceSource};
pub use yahoo::YahooProvider;
