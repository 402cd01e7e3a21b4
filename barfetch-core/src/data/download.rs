//! Batch orchestrator: runs tickers one at a time through fetch → normalize → write.
//!
//! Each ticker is an independent unit: whatever goes wrong inside it is recorded
//! as a failed outcome and the loop moves on. Nothing is retried at this level.
//! The only fatal error is failing to create a batch's output directory.

use super::normalize::{build_series, normalize};
use super::progress::DownloadProgress;
use super::provider::{DataError, DataProvider};
use super::report::{BatchReport, RunSummary, TickerOutcome};
use super::writer::write_series;
use crate::config::{BatchSpec, DateRange, FetchConfig};
use crate::domain::AssetSeries;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Run every batch of `config` in order.
pub fn run(
    provider: &dyn DataProvider,
    config: &FetchConfig,
    progress: &dyn DownloadProgress,
) -> Result<RunSummary, DownloadError> {
    let started_at = Utc::now();
    let mut batches = Vec::with_capacity(config.batches.len());

    for batch in &config.batches {
        let report = fetch_batch(
            provider,
            batch,
            config.range,
            &config.batch_dir(batch),
            progress,
        )?;
        batches.push(report);
    }

    let summary = RunSummary {
        provider: provider.name().to_string(),
        range: config.range,
        started_at,
        finished_at: Utc::now(),
        batches,
    };
    progress.on_run_complete(&summary);
    Ok(summary)
}

/// Fetch every ticker of one batch into `output_dir`.
pub fn fetch_batch(
    provider: &dyn DataProvider,
    batch: &BatchSpec,
    range: DateRange,
    output_dir: &Path,
    progress: &dyn DownloadProgress,
) -> Result<BatchReport, DownloadError> {
    let _span = tracing::info_span!("batch", category = %batch.category).entered();

    std::fs::create_dir_all(output_dir).map_err(|source| DownloadError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let total = batch.tickers.len();
    let mut report = BatchReport::new(&batch.category, output_dir);
    progress.on_batch_start(&batch.category, total);
    let mut warned_unavailable = false;

    for (i, ticker) in batch.tickers.iter().enumerate() {
        if !warned_unavailable && !provider.is_available() {
            tracing::warn!(
                provider = provider.name(),
                "provider is refusing requests; remaining tickers will fail"
            );
            warned_unavailable = true;
        }
        progress.on_start(ticker, i, total);

        let outcome = match fetch_single(provider, ticker, range, output_dir) {
            Ok((file, series)) => fetched_outcome(file, &series),
            Err(e) => {
                tracing::info!(ticker = %ticker, error = %e, "ticker failed");
                TickerOutcome::Failed {
                    ticker: ticker.clone(),
                    reason: e.to_string(),
                }
            }
        };

        progress.on_complete(&outcome, i, total);
        report.outcomes.push(outcome);
    }

    progress.on_batch_complete(&report);
    Ok(report)
}

/// Fetch one ticker and write its document: fetch → flatten → name → normalize → write.
///
/// Returns the written path and the series. An empty fetch is [`DataError::NoData`]
/// and leaves the output directory untouched.
pub fn fetch_single(
    provider: &dyn DataProvider,
    ticker: &str,
    range: DateRange,
    output_dir: &Path,
) -> Result<(PathBuf, AssetSeries), DataError> {
    let mut table = provider.fetch(ticker, range.start, range.end)?;
    if table.is_hierarchical() {
        tracing::debug!(ticker, "flattening hierarchical columns");
        table.flatten_columns();
    }
    if table.is_empty() {
        return Err(DataError::NoData);
    }

    let name = match provider.display_name(ticker) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!(ticker, error = %e, "name lookup failed; using ticker as name");
            ticker.to_string()
        }
    };

    let bars = normalize(&table)?;
    let series = build_series(ticker, &name, range.start, bars)?;
    let path = write_series(output_dir, &series)?;
    Ok((path, series))
}

fn fetched_outcome(file: PathBuf, series: &AssetSeries) -> TickerOutcome {
    TickerOutcome::Fetched {
        ticker: series.ticker.clone(),
        name: series.name.clone(),
        file,
        days: series.period.days,
        first_date: series.first_date().unwrap_or(series.period.start),
        last_date: series.period.end,
    }
}
