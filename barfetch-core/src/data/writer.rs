//! JSON writer — one pretty-printed document per ticker.
//!
//! Layout: `{output_dir}/{SANITIZED_TICKER}.json`
//!
//! Writes are atomic (write to .tmp, rename into place) and overwrite any
//! existing file unconditionally.

use super::provider::DataError;
use crate::domain::AssetSeries;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a file name on at least one common filesystem.
const PATH_HOSTILE: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn a provider symbol into a file stem.
///
/// `GC=F` → `GC`, `BTC-USD` → `BTC`, `BRK.B` → `BRK_B`.
pub fn sanitize_ticker(ticker: &str) -> String {
    ticker
        .trim()
        .replace("=F", "")
        .replace("-USD", "")
        .replace('.', "_")
        .chars()
        .map(|c| {
            if PATH_HOSTILE.contains(&c) || c.is_whitespace() || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Path of the document for `ticker` inside `dir`.
pub fn output_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_ticker(ticker)))
}

/// Serialize a series to its output path, replacing whatever was there.
pub fn write_series(dir: &Path, series: &AssetSeries) -> Result<PathBuf, DataError> {
    if sanitize_ticker(&series.ticker).is_empty() {
        return Err(DataError::Write(format!(
            "ticker '{}' has no usable file name",
            series.ticker
        )));
    }
    let path = output_path(dir, &series.ticker);
    let tmp_path = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(series)?;
    fs::write(&tmp_path, json)
        .map_err(|e| DataError::Write(format!("{}: {e}", tmp_path.display())))?;

    fs::rename(&tmp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::Write(format!("atomic rename to {} failed: {e}", path.display()))
    })?;

    Ok(path)
}

/// Load a previously written document.
pub fn read_series(path: &Path) -> Result<AssetSeries, DataError> {
    let content = fs::read_to_string(path)
        .map_err(|e| DataError::Other(format!("read {}: {e}", path.display())))?;
    Ok(serde_json::from_str(&content)?)
}

/// All `*.json` documents in `dir`, sorted by file name. A missing directory is empty.
pub fn list_series_files(dir: &Path) -> Result<Vec<PathBuf>, DataError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries =
        fs::read_dir(dir).map_err(|e| DataError::Other(format!("read dir {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| DataError::Other(format!("dir entry: {e}")))?
            .path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
