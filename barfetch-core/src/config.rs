//! Serializable fetch configuration.
//!
//! A config file names the output root, the date range, provider client
//! settings, and one `[[batch]]` table per asset class:
//!
//! ```toml
//! output_root = "assets/market_data"
//!
//! [range]
//! start = "2000-01-01"
//! end = "2025-12-31"
//!
//! [[batch]]
//! category = "ETFs"
//! subdir = "etfs"
//! tickers = ["SPY", "QQQ", "IWM", "DIA"]
//! ```
//!
//! Every table except `batch` may be omitted.

use crate::universe;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Requested date range. `end` is exclusive, as the provider treats it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
        }
    }
}

/// HTTP client settings for the Yahoo provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Transport-level retries on 429, 5xx, connect and timeout errors. Off by default.
    pub max_retries: u32,
    /// First retry delay; doubles on each further attempt.
    pub retry_base_delay_ms: u64,
    pub user_agent: String,
    /// API host; point at a mirror or proxy if needed.
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 0,
            retry_base_delay_ms: 500,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            base_url: "https://query2.finance.yahoo.com".into(),
        }
    }
}

/// One asset class: display label, output subdirectory, and symbols.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSpec {
    /// Label used in progress output, e.g. `S&P 500 Stocks`.
    pub category: String,
    /// Directory under `output_root`, e.g. `stocks`.
    pub subdir: String,
    pub tickers: Vec<String>,
}

impl BatchSpec {
    pub fn new(category: impl Into<String>, subdir: impl Into<String>, tickers: &[&str]) -> Self {
        Self {
            category: category.into(),
            subdir: subdir.into(),
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    #[serde(default)]
    pub range: DateRange,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default, rename = "batch")]
    pub batches: Vec<BatchSpec>,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("assets/market_data")
}

impl Default for FetchConfig {
    /// Built-in universe: S&P 500 stocks, ETFs, commodity futures, crypto.
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            range: DateRange::default(),
            provider: ProviderConfig::default(),
            batches: universe::default_batches(),
        }
    }
}

impl FetchConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.range.start >= self.range.end {
            return Err(ConfigError::Invalid(format!(
                "range.start ({}) must be before range.end ({})",
                self.range.start, self.range.end
            )));
        }
        if self.batches.is_empty() {
            return Err(ConfigError::Invalid("at least one [[batch]] is required".into()));
        }

        let mut subdirs = HashSet::new();
        for batch in &self.batches {
            let mut components = Path::new(&batch.subdir).components();
            let single_normal = matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );
            if !single_normal {
                return Err(ConfigError::Invalid(format!(
                    "batch '{}': subdir '{}' must be a single directory name",
                    batch.category, batch.subdir
                )));
            }
            if !subdirs.insert(batch.subdir.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "subdir '{}' is used by more than one batch",
                    batch.subdir
                )));
            }

            let mut seen = HashSet::new();
            for ticker in &batch.tickers {
                if ticker.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "batch '{}' contains a blank ticker",
                        batch.category
                    )));
                }
                if !seen.insert(ticker.as_str()) {
                    tracing::warn!(
                        batch = %batch.subdir,
                        ticker = %ticker,
                        "duplicate ticker; it will be fetched twice"
                    );
                }
            }
        }
        Ok(())
    }

    /// Output directory for a batch.
    pub fn batch_dir(&self, batch: &BatchSpec) -> PathBuf {
        self.output_root.join(&batch.subdir)
    }

    /// Keep only the batches whose subdir is listed. An empty list keeps everything.
    pub fn retain_batches(&mut self, subdirs: &[String]) -> Result<(), ConfigError> {
        if subdirs.is_empty() {
            return Ok(());
        }
        for wanted in subdirs {
            if !self.batches.iter().any(|b| &b.subdir == wanted) {
                let known: Vec<&str> = self.batches.iter().map(|b| b.subdir.as_str()).collect();
                return Err(ConfigError::Invalid(format!(
                    "unknown batch '{wanted}'. Valid: {}",
                    known.join(", ")
                )));
            }
        }
        self.batches.retain(|b| subdirs.contains(&b.subdir));
        Ok(())
    }

    pub fn ticker_count(&self) -> usize {
        self.batches.iter().map(|b| b.tickers.len()).sum()
    }
}
