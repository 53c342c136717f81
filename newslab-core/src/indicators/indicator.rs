//! The `Indicator` trait and the column store the engine fills.

use crate::domain::Bar;

/// A derived series computed from bar history.
///
/// `compute` returns exactly one value per bar. The first `lookback()` rows
/// are NaN, and a value at row t only ever reads bars `0..=t`.
pub trait Indicator {
    /// Column name in the enriched output, e.g. `sma_20`.
    fn name(&self) -> &str;

    fn lookback(&self) -> usize;

    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Derived columns by name, in the order they were added.
///
/// NaN is stored as-is; `value` is the accessor that turns it into `None`.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    columns: Vec<(String, Vec<f64>)>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, or overwrite the one already stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        if let Some(slot) = self.slot_mut(&name) {
            *slot = values;
        } else {
            self.columns.push((name, values));
        }
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find_map(|(n, values)| (n == name).then_some(values.as_slice()))
    }

    /// Raw cell, NaN included. `None` for an unknown column or row.
    pub fn get(&self, name: &str, row: usize) -> Option<f64> {
        self.get_series(name)?.get(row).copied()
    }

    pub fn value(&self, name: &str, row: usize) -> Option<f64> {
        self.get(name, row).filter(|v| !v.is_nan())
    }

    pub fn last_valid(&self, name: &str) -> Option<f64> {
        self.get_series(name)?
            .iter()
            .rev()
            .find(|v| !v.is_nan())
            .copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Vec<f64>> {
        self.columns
            .iter_mut()
            .find_map(|(n, values)| (n == name).then_some(values))
    }
}
