//! Per-ticker outcomes and batch/run summaries.
//!
//! The same types drive the human-readable progress output and the optional
//! JSON report written with `--report`.

use crate::config::DateRange;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Trading days per year, used for the "~N years" hint.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Result of processing one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerOutcome {
    Fetched {
        ticker: String,
        name: String,
        file: PathBuf,
        days: usize,
        first_date: NaiveDate,
        last_date: NaiveDate,
    },
    Failed {
        ticker: String,
        reason: String,
    },
}

impl TickerOutcome {
    pub fn ticker(&self) -> &str {
        match self {
            TickerOutcome::Fetched { ticker, .. } | TickerOutcome::Failed { ticker, .. } => ticker,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TickerOutcome::Fetched { .. })
    }
}

/// Outcomes for one batch, in ticker order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub category: String,
    pub output_dir: PathBuf,
    pub outcomes: Vec<TickerOutcome>,
}

impl BatchReport {
    pub fn new(category: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            category: category.into(),
            output_dir: output_dir.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failed_tickers(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.ticker())
            .collect()
    }

    /// Sum of bars over successful tickers.
    pub fn total_days(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                TickerOutcome::Fetched { days, .. } => *days,
                TickerOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Mean bar count over successful tickers, `None` when nothing succeeded.
    pub fn average_days(&self) -> Option<usize> {
        match self.succeeded() {
            0 => None,
            n => Some(self.total_days() / n),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Every batch of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub provider: String,
    pub range: DateRange,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub batches: Vec<BatchReport>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.batches.iter().map(BatchReport::succeeded).sum()
    }

    pub fn failed(&self) -> usize {
        self.batches.iter().map(BatchReport::failed).sum()
    }

    /// Mean bar count over successful tickers (integer division), `None` when nothing succeeded.
    pub fn average_days(&self) -> Option<usize> {
        let succeeded = self.succeeded();
        if succeeded == 0 {
            return None;
        }
        let total: usize = self.batches.iter().map(BatchReport::total_days).sum();
        Some(total / succeeded)
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(ticker: &str, days: usize) -> TickerOutcome {
        TickerOutcome::Fetched {
            ticker: ticker.into(),
            name: ticker.into(),
            file: PathBuf::from(format!("{ticker}.json")),
            days,
            first_date: NaiveDate::from_ymd_opt(2000, 1, 3).unwrap(),
            last_date: NaiveDate::from_ymd_opt(2025, 12, 30).unwrap(),
        }
    }

    fn failed(ticker: &str) -> TickerOutcome {
        TickerOutcome::Failed {
            ticker: ticker.into(),
            reason: "no data".into(),
        }
    }

    fn summary(batches: Vec<BatchReport>) -> RunSummary {
        let now = Utc::now();
        RunSummary {
            provider: "test".into(),
            range: DateRange::default(),
            started_at: now,
            finished_at: now,
            batches,
        }
    }

    #[test]
    fn batch_counts() {
        let mut report = BatchReport::new("Stocks", "out/stocks");
        report.outcomes.push(fetched("AAPL", 6300));
        report.outcomes.push(failed("BBBY"));
        report.outcomes.push(fetched("MSFT", 6200));

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failed_tickers(), vec!["BBBY"]);
        assert_eq!(report.total_days(), 12_500);
        assert_eq!(report.average_days(), Some(6250));
        assert!(!report.all_succeeded());
    }

    #[test]
    fn run_average_spans_batches() {
        let mut stocks = BatchReport::new("Stocks", "out/stocks");
        stocks.outcomes.push(fetched("AAPL", 6000));
        let mut crypto = BatchReport::new("Crypto", "out/crypto");
        crypto.outcomes.push(fetched("BTC-USD", 3001));
        crypto.outcomes.push(failed("XYZ-USD"));

        let run = summary(vec![stocks, crypto]);
        assert_eq!(run.succeeded(), 2);
        assert_eq!(run.failed(), 1);
        assert_eq!(run.average_days(), Some(4500));
    }

    #[test]
    fn no_average_without_successes() {
        let mut report = BatchReport::new("Stocks", "out");
        report.outcomes.push(failed("GPS"));
        assert_eq!(summary(vec![report]).average_days(), None);
    }

    #[test]
    fn outcomes_serialize_with_status_tag() {
        let json = serde_json::to_value(failed("WISH")).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["ticker"], "WISH");
        assert_eq!(json["reason"], "no data");
    }

    #[test]
    fn writes_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/run.json");
        let mut report = BatchReport::new("ETFs", "out/etfs");
        report.outcomes.push(fetched("SPY", 10));
        let run = summary(vec![report]);

        run.write_json(&path).unwrap();
        let back: RunSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, run);
    }
}
