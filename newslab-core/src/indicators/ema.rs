//! Exponential moving average, seeded with the simple mean of the first
//! `period` values and smoothed with `alpha = 2 / (period + 1)`.

/// EMA of a raw series. A NaN in the seed window leaves the whole output
/// NaN; a NaN afterwards ends the series at that row.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let (seed, rest) = values.split_at(period);
    if seed.iter().any(|v| v.is_nan()) {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut current = seed.iter().sum::<f64>() / period as f64;
    out[period - 1] = current;

    for (slot, &value) in out[period..].iter_mut().zip(rest) {
        if value.is_nan() {
            break;
        }
        current += alpha * (value - current);
        *slot = current;
    }

    out
}

/// EMA of a series whose leading rows are NaN warmup (the MACD line, for
/// one). Seeding starts at the first defined value.
pub fn ema_after_warmup(values: &[f64], period: usize) -> Vec<f64> {
    let start = values
        .iter()
        .position(|v| !v.is_nan())
        .unwrap_or(values.len());
    let mut out = vec![f64::NAN; start];
    out.extend(ema_of_series(&values[start..], period));
    out
}
