//! Domain types for the output documents.

pub mod bar;
pub mod series;

pub use bar::{coerce_volume, round_price, DailyBar};
pub use series::{AssetSeries, Period};
