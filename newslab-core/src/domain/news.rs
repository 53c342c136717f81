//! News-headline dataset held as a Polars frame.
//!
//! Columns are kept exactly as they appear in the source file. Every
//! column is read as text; reporters parse what they need (dates, lengths)
//! and decide for themselves what to do with values that don't parse.

use crate::data::DataError;
use polars::prelude::*;

pub const HEADLINE: &str = "headline";
pub const DATE: &str = "date";
pub const PUBLISHER: &str = "publisher";
pub const CONTENT: &str = "content";

#[derive(Debug, Clone)]
pub struct NewsTable {
    frame: DataFrame,
}

impl NewsTable {
    pub fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Build a table from named text columns of equal length.
    pub fn from_columns(columns: Vec<(&str, Vec<Option<&str>>)>) -> Result<Self, DataError> {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Column::new(name.into(), values))
            .collect();
        let frame = DataFrame::new(columns).map_err(|e| DataError::Parse(e.to_string()))?;
        Ok(Self { frame })
    }

    /// Read a delimited file with a header row; see `data::load_news_csv`.
    pub fn from_csv(path: impl AsRef<std::path::Path>) -> Result<Self, DataError> {
        crate::data::load_news_csv(path.as_ref())
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect()
    }

    /// Values of a column as optional strings, one per row.
    ///
    /// Returns `None` when the column does not exist. Non-text columns are
    /// cast to text first.
    pub fn text_column(&self, name: &str) -> Option<Vec<Option<String>>> {
        let column = self.frame.column(name).ok()?;
        let series = column
            .as_materialized_series()
            .cast(&DataType::String)
            .ok()?;
        let values = series
            .str()
            .ok()?
            .into_iter()
            .map(|v| v.map(str::to_owned))
            .collect();
        Some(values)
    }
}
