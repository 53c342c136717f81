//! Simple moving average and the shared rolling-window helper.

use super::indicator::Indicator;
use crate::domain::{Bar, PriceField};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    field: PriceField,
    name: String,
}

impl Sma {
    /// Average of closes over `period` rows.
    pub fn new(period: usize) -> Self {
        Self::of(PriceField::Close, period)
    }

    pub fn of(field: PriceField, period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        let name = match field {
            PriceField::Close => format!("sma_{period}"),
            PriceField::Volume => format!("volume_sma_{period}"),
        };
        Self {
            period,
            field,
            name,
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let values: Vec<f64> = bars.iter().map(|b| self.field.extract(b)).collect();
        sma_of_series(&values, self.period)
    }
}

pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, mean)
}

/// Apply `stat` to every trailing window of `period` rows.
///
/// The result is aligned with `values`: rows before the first full window,
/// and windows containing a NaN, are NaN.
pub(crate) fn rolling(values: &[f64], period: usize, stat: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![f64::NAN; values.len()];
    }

    let mut out = vec![f64::NAN; period - 1];
    out.extend(values.windows(period).map(|window| {
        if window.iter().any(|v| v.is_nan()) {
            f64::NAN
        } else {
            stat(window)
        }
    }));
    out
}

pub(crate) fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}
