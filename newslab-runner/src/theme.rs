//! Chart color themes.
//!
//! Two palettes:
//! - **husl**: evenly spaced hues on a light background (the default)
//! - **neon**: parrot/neon accents on a near-black background
//!
//! A theme is a plain value handed to the renderer; nothing here touches
//! global state.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Husl,
    Neon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub palette: Palette,
    pub background: RGBColor,
    pub text: RGBColor,
    pub grid: RGBColor,
    /// Cycled for line/bar series.
    pub series: Vec<RGBColor>,
    pub positive: RGBColor,
    pub negative: RGBColor,
    /// Guide lines (RSI 30/70, zero lines).
    pub guide: RGBColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::husl()
    }
}

impl ChartTheme {
    pub fn from_palette(palette: Palette) -> Self {
        match palette {
            Palette::Husl => Self::husl(),
            Palette::Neon => Self::neon(),
        }
    }

    /// Eight evenly spaced HUSL hues on white.
    pub fn husl() -> Self {
        Self {
            palette: Palette::Husl,
            background: RGBColor(255, 255, 255),
            text: RGBColor(34, 34, 34),
            grid: RGBColor(221, 221, 221),
            series: vec![
                RGBColor(246, 112, 136),
                RGBColor(206, 143, 49),
                RGBColor(150, 163, 49),
                RGBColor(50, 177, 101),
                RGBColor(53, 172, 164),
                RGBColor(56, 168, 218),
                RGBColor(161, 144, 244),
                RGBColor(245, 101, 204),
            ],
            positive: RGBColor(50, 177, 101),
            negative: RGBColor(246, 112, 136),
            guide: RGBColor(128, 128, 128),
        }
    }

    /// Electric cyan, neon green, hot pink on deep charcoal.
    pub fn neon() -> Self {
        Self {
            palette: Palette::Neon,
            background: RGBColor(18, 18, 20),
            text: RGBColor(255, 255, 255),
            grid: RGBColor(60, 60, 66),
            series: vec![
                RGBColor(0, 255, 255),
                RGBColor(255, 140, 0),
                RGBColor(147, 112, 219),
                RGBColor(100, 149, 237),
                RGBColor(0, 255, 128),
                RGBColor(255, 20, 147),
            ],
            positive: RGBColor(0, 255, 128),
            negative: RGBColor(255, 20, 147),
            guide: RGBColor(170, 170, 170),
        }
    }

    /// Color for the i-th series, wrapping around the palette.
    pub fn series_color(&self, i: usize) -> RGBColor {
        self.series[i % self.series.len()]
    }

    /// Positive values get the positive color, negative the negative one.
    pub fn sign_color(&self, value: f64) -> RGBColor {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lookup() {
        assert_eq!(ChartTheme::from_palette(Palette::Neon).background, RGBColor(18, 18, 20));
        assert_eq!(ChartTheme::default().palette, Palette::Husl);
    }

    #[test]
    fn series_colors_wrap() {
        let theme = ChartTheme::husl();
        assert_eq!(theme.series_color(0), theme.series_color(theme.series.len()));
    }

    #[test]
    fn sign_color() {
        let theme = ChartTheme::neon();
        assert_eq!(theme.sign_color(0.5), theme.positive);
        assert_eq!(theme.sign_color(0.0), theme.positive);
        assert_eq!(theme.sign_color(-0.1), theme.negative);
    }
}
