//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the upstream price source so the batch
//! routine can be driven by Yahoo Finance in production and by an in-memory
//! table in tests.

use super::table::PriceTable;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
///
/// Every variant is displayable as the short failure reason in progress output.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data")]
    NoData,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for upstream price sources.
///
/// Implementations are blocking; the batch routine calls them one ticker at a time.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the daily table for a symbol over `[start, end)`.
    ///
    /// An invalid, delisted or unsupported symbol yields an empty table rather
    /// than an error, so callers can treat "no rows" uniformly.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<PriceTable, DataError>;

    /// Best-effort display name lookup.
    fn display_name(&self, symbol: &str) -> Result<String, DataError>;

    /// Check if the provider is currently accepting requests.
    fn is_available(&self) -> bool {
        true
    }
}
