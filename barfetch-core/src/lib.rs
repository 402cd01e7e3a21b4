//! barfetch core: historical daily OHLCV snapshots as per-ticker JSON documents.
//!
//! This crate contains:
//! - Domain types for the output documents (daily bars, asset series)
//! - The `DataProvider` trait and the Yahoo Finance implementation
//! - Price-table flattening and normalization into 2-decimal bars
//! - The JSON writer with filename sanitization
//! - The sequential batch routine with per-ticker outcomes and reports
//! - TOML configuration and the built-in ticker universe

pub mod config;
pub mod data;
pub mod domain;
pub mod universe;

pub use config::{BatchSpec, ConfigError, DateRange, FetchConfig, ProviderConfig};
