//! Bollinger bands: a simple moving average with an envelope of
//! `multiplier` population standard deviations.

use super::indicator::Indicator;
use super::sma::{mean, rolling};
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

impl BollingerBand {
    fn column(self) -> &'static str {
        match self {
            BollingerBand::Upper => "bb_upper",
            BollingerBand::Middle => "bb_middle",
            BollingerBand::Lower => "bb_lower",
        }
    }

    /// Sign applied to the envelope width.
    fn side(self) -> f64 {
        match self {
            BollingerBand::Upper => 1.0,
            BollingerBand::Middle => 0.0,
            BollingerBand::Lower => -1.0,
        }
    }
}

/// One band per instance; the engine registers all three.
#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            band,
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Lower)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        self.band.column()
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let offset = self.multiplier * self.band.side();
        rolling(&closes, self.period, |window| {
            let centre = mean(window);
            if offset == 0.0 {
                return centre;
            }
            let variance =
                window.iter().map(|v| (v - centre).powi(2)).sum::<f64>() / window.len() as f64;
            centre + offset * variance.sqrt()
        })
    }
}
