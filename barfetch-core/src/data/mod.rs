//! Fetching, normalizing and writing per-ticker documents

pub mod circuit_breaker;
pub mod download;
pub mod normalize;
pub mod progress;
pub mod provider;
pub mod report;
pub mod table;
pub mod writer;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use download::{fetch_batch, fetch_single, run, DownloadError};
pub use normalize::{build_series, normalize};
pub use progress::{DownloadProgress, SilentProgress, StdoutProgress};
pub use provider::{DataError, DataProvider};
pub use report::{BatchReport, RunSummary, TickerOutcome};
pub use table::{PriceRow, PriceTable};
pub use writer::{list_series_files, output_path, read_series, sanitize_ticker, write_series};
pub use yahoo::YahooProvider;
