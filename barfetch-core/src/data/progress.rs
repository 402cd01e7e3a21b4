//! Progress reporting for batch fetches.

use super::report::{BatchReport, RunSummary, TickerOutcome, TRADING_DAYS_PER_YEAR};
use std::io::Write;

/// Progress callback for batch operations.
///
/// Purely advisory: nothing the batch routine does depends on it.
pub trait DownloadProgress {
    /// Called once before the first ticker of a batch.
    fn on_batch_start(&self, category: &str, total: usize);

    /// Called when starting to fetch a ticker.
    fn on_start(&self, ticker: &str, index: usize, total: usize);

    /// Called when a ticker has been written or has failed.
    fn on_complete(&self, outcome: &TickerOutcome, index: usize, total: usize);

    /// Called when every ticker of a batch has been processed.
    fn on_batch_complete(&self, report: &BatchReport);

    /// Called once after the last batch.
    fn on_run_complete(&self, _summary: &RunSummary) {}
}

/// Plain progress lines on stdout.
pub struct StdoutProgress;

impl DownloadProgress for StdoutProgress {
    fn on_batch_start(&self, category: &str, total: usize) {
        println!("\n=== Fetching {category} ({total} tickers) ===");
    }

    fn on_start(&self, ticker: &str, _index: usize, _total: usize) {
        print!("Fetching {ticker}... ");
        let _ = std::io::stdout().flush();
    }

    fn on_complete(&self, outcome: &TickerOutcome, _index: usize, _total: usize) {
        match outcome {
            TickerOutcome::Fetched {
                days,
                first_date,
                last_date,
                ..
            } => println!("OK {days} days ({first_date} to {last_date})"),
            TickerOutcome::Failed { reason, .. } => println!("FAILED {reason}"),
        }
    }

    fn on_batch_complete(&self, report: &BatchReport) {
        println!(
            "{} completed: {} successful, {} failed",
            report.category,
            report.succeeded(),
            report.failed()
        );
        println!("Data saved to: {}", report.output_dir.display());

        if !report.all_succeeded() {
            println!("Failed tickers:");
            for ticker in report.failed_tickers() {
                println!("  - {ticker}");
            }
            println!(
                "  NOTE: these may be delisted, renamed, or unavailable from the provider; \
                 update the ticker list by hand."
            );
        }
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        println!("\n{}", "=".repeat(70));
        println!(
            "TOTAL: {} successful, {} failed",
            summary.succeeded(),
            summary.failed()
        );
        println!("{}", "=".repeat(70));
        if let Some(avg) = summary.average_days() {
            println!(
                "Average: ~{avg} trading days per ticker (~{:.1} years)",
                avg as f64 / TRADING_DAYS_PER_YEAR
            );
        }
    }
}

/// Discards all progress. Used when only the JSON report is wanted.
pub struct SilentProgress;

impl DownloadProgress for SilentProgress {
    fn on_batch_start(&self, _category: &str, _total: usize) {}
    fn on_start(&self, _ticker: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _outcome: &TickerOutcome, _index: usize, _total: usize) {}
    fn on_batch_complete(&self, _report: &BatchReport) {}
}
