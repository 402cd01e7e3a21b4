//! AssetSeries: the per-ticker document written to disk.

use super::bar::DailyBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Requested start, actual last date, and bar count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
}

/// Full history for one ticker.
///
/// `ticker` is the symbol as requested (e.g. `GC=F`), not the sanitized file stem.
/// Built once, serialized once; there is no mutation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSeries {
    pub ticker: String,
    pub name: String,
    pub period: Period,
    pub ohlc: Vec<DailyBar>,
}

impl AssetSeries {
    /// Date of the first bar, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.ohlc.first().map(|b| b.date)
    }

    /// Date of the last bar, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.ohlc.last().map(|b| b.date)
    }
}
