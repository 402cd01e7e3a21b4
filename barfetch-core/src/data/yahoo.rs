//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API and display names from the
//! v1 search API. Handles transient rate limiting with bounded exponential
//! backoff, response parsing, and the circuit breaker.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, DataProvider};
use super::table::PriceTable;
use crate::config::ProviderConfig;
use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Yahoo Finance v1 search API response (only the fields we read).
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: String,
    longname: Option<String>,
    shortname: Option<String>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(
        config: &ProviderConfig,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// Build the chart API URL for a symbol and a `[start, end)` date range.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        format!(
            "{}/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d\
             &events=div%2Csplits",
            self.base_url
        )
    }

    /// Parse the chart API response into a price table.
    ///
    /// "Not Found" and a result without timestamps both mean the provider has no
    /// bars for this symbol and range; they yield an empty table.
    fn parse_chart(symbol: &str, resp: ChartResponse) -> Result<PriceTable, DataError> {
        let Some(results) = resp.chart.result else {
            return match resp.chart.error {
                Some(err) if err.code == "Not Found" => {
                    tracing::debug!(symbol, description = %err.description, "symbol not found");
                    Ok(PriceTable::empty())
                }
                Some(err) => Err(DataError::ResponseFormatChanged(format!(
                    "{}: {}",
                    err.code, err.description
                ))),
                None => Err(DataError::ResponseFormatChanged(
                    "empty result with no error".into(),
                )),
            };
        };

        let Some(data) = results.into_iter().next() else {
            return Ok(PriceTable::empty());
        };
        let Some(timestamps) = data.timestamp else {
            return Ok(PriceTable::empty());
        };

        let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

        // Bars are dated in the exchange's local time, not UTC.
        let offset = data.meta.gmtoffset;
        tracing::debug!(
            symbol,
            gmtoffset = offset,
            timezone = data.meta.exchange_timezone_name.as_deref().unwrap_or("UTC"),
            rows = timestamps.len(),
            "parsing chart"
        );

        let n = timestamps.len();
        let mut dates = Vec::with_capacity(n);
        let mut open = Vec::with_capacity(n);
        let mut high = Vec::with_capacity(n);
        let mut low = Vec::with_capacity(n);
        let mut close = Vec::with_capacity(n);
        let mut volume = Vec::with_capacity(n);
        let mut partial = 0usize;

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let o = quote.open.get(i).copied().flatten();
            let h = quote.high.get(i).copied().flatten();
            let l = quote.low.get(i).copied().flatten();
            let c = quote.close.get(i).copied().flatten();

            match (o, h, l, c) {
                (Some(o), Some(h), Some(l), Some(c)) => {
                    dates.push(date);
                    open.push(Some(o));
                    high.push(Some(h));
                    low.push(Some(l));
                    close.push(Some(c));
                    volume.push(quote.volume.get(i).copied().flatten());
                }
                // Holidays and non-trading days come back with every field null.
                (None, None, None, None) => {}
                _ => partial += 1,
            }
        }

        if partial > 0 {
            tracing::debug!(symbol, skipped = partial, "skipped rows with missing prices");
        }

        PriceTable::new(dates)
            .with_column(["Open"], open)?
            .with_column(["High"], high)?
            .with_column(["Low"], low)?
            .with_column(["Close"], close)?
            .with_column(["Volume"], volume)
    }

    /// Pick the display name for `symbol` out of a search response.
    fn parse_search(symbol: &str, resp: SearchResponse) -> Result<String, DataError> {
        resp.quotes
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .and_then(|q| q.longname.or(q.shortname))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }

    /// GET a JSON document with circuit breaker logic.
    ///
    /// A single attempt unless `max_retries` is configured; retries apply to
    /// 429, 5xx, connect and timeout failures. Returns `Ok(None)` on 404 so callers can distinguish "unknown symbol" from
    /// transport failures.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        symbol: &str,
    ) -> Result<Option<T>, DataError> {
        if !self.circuit_breaker.is_allowed() {
            tracing::debug!(
                symbol,
                remaining = ?self.circuit_breaker.remaining_cooldown(),
                "circuit breaker open, skipping request"
            );
            return Err(DataError::CircuitBreakerTripped);
        }

        tracing::debug!(url, "GET");
        let mut last_error = None;
        let mut retry_after: Option<Duration> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = self.base_delay * 2u32.pow(attempt - 1);
                // A Retry-After from the provider overrides a shorter backoff.
                let delay = retry_after.take().map_or(backoff, |ra| ra.max(backoff));
                tracing::warn!(symbol, attempt, ?delay, "retrying request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == StatusCode::FORBIDDEN {
                        self.circuit_breaker.trip();
                        return Err(DataError::CircuitBreakerTripped);
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after_secs = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.trim().parse::<u64>().ok())
                            .unwrap_or(60);
                        retry_after = Some(Duration::from_secs(retry_after_secs));
                        last_error = Some(DataError::RateLimited { retry_after_secs });
                        continue;
                    }

                    if status == StatusCode::NOT_FOUND {
                        self.circuit_breaker.record_success();
                        return Ok(None);
                    }

                    if status.is_server_error() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    if !status.is_success() {
                        return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
                    }

                    let body: T = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;
                    self.circuit_breaker.record_success();
                    return Ok(Some(body));
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceTable, DataError> {
        let url = self.chart_url(symbol, start, end);
        match self.get_json::<ChartResponse>(&url, symbol)? {
            Some(chart) => Self::parse_chart(symbol, chart),
            None => Ok(PriceTable::empty()),
        }
    }

    fn display_name(&self, symbol: &str) -> Result<String, DataError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v1/finance/search", self.base_url),
            &[("q", symbol), ("quotesCount", "5"), ("newsCount", "0")],
        )
        .map_err(|e| DataError::Other(format!("invalid search url: {e}")))?;
        match self.get_json::<SearchResponse>(url.as_str(), symbol)? {
            Some(search) => Self::parse_search(symbol, search),
            None => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
        }
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}
