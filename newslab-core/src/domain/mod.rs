//! Domain types: price bars, price series, news tables.

pub mod bar;
pub mod news;
pub mod series;

pub use bar::{Bar, PriceField};
pub use news::NewsTable;
pub use series::PriceSeries;
