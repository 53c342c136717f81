//! Return and drawdown series over close prices.
//!
//! All values are percentages except `cumulative_return`, which is a
//! fraction (0.25 = +25%).

/// Daily percent change: `(close_t / close_{t-1} - 1) * 100`. Row 0 is NaN.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; closes.len()];
    for i in 1..closes.len() {
        result[i] = (closes[i] / closes[i - 1] - 1.0) * 100.0;
    }
    result
}

/// Running product of `(1 + r/100)` minus 1.
///
/// The first row has no prior close and counts as a zero return, so the
/// series starts at exactly 0. Later NaN returns leave the product unchanged.
pub fn cumulative_returns(daily: &[f64]) -> Vec<f64> {
    let mut growth = 1.0;
    daily
        .iter()
        .map(|&r| {
            if !r.is_nan() {
                growth *= 1.0 + r / 100.0;
            }
            growth - 1.0
        })
        .collect()
}

/// Cumulative maximum of the closes seen so far.
pub fn running_max(closes: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    closes
        .iter()
        .map(|&c| {
            if c > peak {
                peak = c;
            }
            peak
        })
        .collect()
}

/// Percent distance below the running maximum; always <= 0.
pub fn drawdowns(closes: &[f64], peaks: &[f64]) -> Vec<f64> {
    closes
        .iter()
        .zip(peaks)
        .map(|(&c, &p)| {
            let dd = (c - p) / p * 100.0;
            // f64::min would turn NaN into 0.0
            if dd.is_nan() {
                dd
            } else {
                dd.min(0.0)
            }
        })
        .collect()
}

/// Most negative drawdown, or `None` for an empty/all-NaN series.
pub fn max_drawdown(drawdowns: &[f64]) -> Option<f64> {
    drawdowns
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
}
