//! DailyBar: one normalized trading day in the output document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of OHLCV data as written to disk.
///
/// Field order matches the on-disk schema: `day, date, open, high, low, close, volume`.
/// `day` is the zero-based position in the series, not a trading-calendar offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub day: usize,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Round a price to two decimal places (half away from zero).
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Coerce a provider volume into a non-negative integer.
///
/// Missing, NaN, infinite and negative values all become 0. Fractional volumes
/// are truncated.
pub fn coerce_volume(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}
