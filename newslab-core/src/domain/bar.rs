//! Daily OHLCV row and the fields indicators can read from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Close,
    Volume,
}

impl PriceField {
    pub fn extract(self, bar: &Bar) -> f64 {
        match self {
            PriceField::Close => bar.close,
            PriceField::Volume => bar.volume as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_read_as_float() {
        let bar = Bar {
            date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            open: 181.0,
            high: 184.5,
            low: 180.2,
            close: 183.9,
            volume: 7_250_000,
        };
        assert_eq!(PriceField::Close.extract(&bar), 183.9);
        assert_eq!(PriceField::Volume.extract(&bar), 7_250_000.0);
    }
}
