//! barfetch CLI — fetch, config and status commands.
//!
//! Commands:
//! - `fetch`: download daily OHLCV for every configured batch and write one JSON file per ticker
//! - `config init`: write the default configuration as TOML
//! - `config show`: print the effective configuration
//! - `status`: list the files already written, per batch

use anyhow::{bail, Context, Result};
use barfetch_core::data::{
    list_series_files, read_series, run, CircuitBreaker, StdoutProgress, YahooProvider,
};
use barfetch_core::{BatchSpec, FetchConfig};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "barfetch.toml";

#[derive(Parser)]
#[command(
    name = "barfetch",
    about = "barfetch: daily OHLCV snapshots as per-ticker JSON files"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured batch and write one JSON file per ticker.
    Fetch {
        /// Path to a TOML config file. Defaults to the built-in ticker lists.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Root directory for batch subdirectories.
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Only run the batches with these subdirs (repeatable).
        #[arg(long = "batch", conflicts_with = "tickers")]
        batches: Vec<String>,

        /// Fetch only these tickers as a single ad-hoc batch.
        #[arg(long, num_args = 1..)]
        tickers: Vec<String>,

        /// Category label for the ad-hoc batch.
        #[arg(long, default_value = "Custom", requires = "tickers")]
        category: String,

        /// Output subdirectory for the ad-hoc batch.
        #[arg(long, default_value = "custom", requires = "tickers")]
        subdir: String,

        /// Start date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive.
        #[arg(long)]
        end: Option<String>,

        /// Also write the run summary as JSON to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Configuration file commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List written files per batch with name, date range and day count.
    Status {
        /// Path to a TOML config file. Defaults to the built-in ticker lists.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Root directory for batch subdirectories.
        #[arg(long)]
        output_root: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration as TOML.
    Init {
        /// Destination file.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective configuration.
    Show {
        /// Path to a TOML config file. Defaults to the built-in ticker lists.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fetch {
            config,
            output_root,
            batches,
            tickers,
            category,
            subdir,
            start,
            end,
            report,
        } => {
            let mut config = load_config(config.as_deref())?;
            if !tickers.is_empty() {
                let refs: Vec<&str> = tickers.iter().map(String::as_str).collect();
                config.batches = vec![BatchSpec::new(category, subdir, &refs)];
            }
            config.retain_batches(&batches)?;
            if let Some(root) = output_root {
                config.output_root = root;
            }
            if let Some(start) = start.as_deref() {
                config.range.start = parse_date(start)?;
            }
            if let Some(end) = end.as_deref() {
                config.range.end = parse_date(end)?;
            }
            config.validate()?;
            run_fetch(&config, report.as_deref())
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => run_config_init(&path, force),
            ConfigAction::Show { config } => {
                let config = load_config(config.as_deref())?;
                print!("{}", config.to_toml()?);
                Ok(())
            }
        },
        Commands::Status {
            config,
            output_root,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(root) = output_root {
                config.output_root = root;
            }
            run_status(&config)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<FetchConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            FetchConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(FetchConfig::default()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn run_fetch(config: &FetchConfig, report: Option<&Path>) -> Result<()> {
    let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = YahooProvider::new(&config.provider, circuit_breaker)?;

    println!(
        "Fetching daily data from {} to {}",
        config.range.start, config.range.end
    );
    println!(
        "{} tickers in {} batch(es), output root: {}",
        config.ticker_count(),
        config.batches.len(),
        config.output_root.display()
    );

    let summary = run(&provider, config, &StdoutProgress)?;

    if let Some(path) = report {
        summary
            .write_json(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    // Per-ticker failures are reported above and do not change the exit status.
    Ok(())
}

fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    let toml = FetchConfig::default().to_toml()?;
    std::fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn run_status(config: &FetchConfig) -> Result<()> {
    println!("Output root: {}", config.output_root.display());

    let mut total_files = 0usize;
    for batch in &config.batches {
        let dir = config.batch_dir(batch);
        let files = list_series_files(&dir)?;
        total_files += files.len();

        println!();
        println!(
            "{} ({}): {} of {} tickers written",
            batch.category,
            dir.display(),
            files.len(),
            batch.tickers.len()
        );
        if files.is_empty() {
            continue;
        }

        println!(
            "{:<10} {:<32} {:<25} {:>6}",
            "Ticker", "Name", "Date Range", "Days"
        );
        println!("{}", "-".repeat(76));
        for file in &files {
            match read_series(file) {
                Ok(series) => {
                    let first = series.first_date().unwrap_or(series.period.start);
                    println!(
                        "{:<10} {:<32} {:<25} {:>6}",
                        series.ticker,
                        truncate(&series.name, 32),
                        format!("{first} to {}", series.period.end),
                        series.period.days
                    );
                }
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "unreadable series file");
                    println!("{:<10} (unreadable: {e})", file.display());
                }
            }
        }
    }

    println!();
    println!("Total files: {total_files}");
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
