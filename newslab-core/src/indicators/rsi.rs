//! Relative Strength Index with Wilder smoothing.
//!
//! The first average gain/loss is the plain mean of the first `period`
//! price changes; later rows smooth with `alpha = 1 / period`. Row
//! `period` is the first defined value. A window with neither gains nor
//! losses reads 50.

use super::indicator::Indicator;
use crate::domain::Bar;

/// RSI of the close.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rsi_of_series(&closes, self.period)
    }
}

/// RSI of a raw series. A NaN anywhere stops the series: every row from
/// the first affected change onwards is NaN.
pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let seed = &changes[..period];
    if seed.iter().any(|c| c.is_nan()) {
        return out;
    }

    let p = period as f64;
    let mut gain = seed.iter().map(|c| c.max(0.0)).sum::<f64>() / p;
    let mut loss = seed.iter().map(|c| (-c).max(0.0)).sum::<f64>() / p;
    out[period] = strength(gain, loss);

    for (row, &change) in changes.iter().enumerate().skip(period).map(|(i, c)| (i + 1, c)) {
        if change.is_nan() {
            break;
        }
        gain = (gain * (p - 1.0) + change.max(0.0)) / p;
        loss = (loss * (p - 1.0) + (-change).max(0.0)) / p;
        out[row] = strength(gain, loss);
    }

    out
}

fn strength(gain: f64, loss: f64) -> f64 {
    match (gain == 0.0, loss == 0.0) {
        (true, true) => 50.0,
        (false, true) => 100.0,
        (true, false) => 0.0,
        (false, false) => (100.0 - 100.0 / (1.0 + gain / loss)).clamp(0.0, 100.0),
    }
}
