//! Price table: the fetcher's row-indexed result.
//!
//! Columns carry a list of name levels. Multi-symbol responses key each field by
//! `(field, symbol)`; rows can only be read once the table has been flattened to
//! single-level names.

use super::provider::DataError;
use chrono::NaiveDate;

/// A named column of optional values, aligned with the table index.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub levels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// One row read from a flattened table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Date-indexed table of OHLCV columns in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    index: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl PriceTable {
    pub fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Table with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a column. Its length must match the index.
    pub fn push_column<S: Into<String>>(
        &mut self,
        levels: impl IntoIterator<Item = S>,
        values: Vec<Option<f64>>,
    ) -> Result<(), DataError> {
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        if levels.is_empty() {
            return Err(DataError::ResponseFormatChanged(
                "column has no name".into(),
            ));
        }
        if values.len() != self.index.len() {
            return Err(DataError::ResponseFormatChanged(format!(
                "column '{}' has {} values for {} rows",
                levels.join("/"),
                values.len(),
                self.index.len()
            )));
        }
        self.columns.push(Column { levels, values });
        Ok(())
    }

    /// Builder form of [`push_column`](Self::push_column).
    pub fn with_column<S: Into<String>>(
        mut self,
        levels: impl IntoIterator<Item = S>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, DataError> {
        self.push_column(levels, values)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// True if any column name has more than one level.
    pub fn is_hierarchical(&self) -> bool {
        self.columns.iter().any(|c| c.levels.len() > 1)
    }

    /// Collapse every column name to its first level.
    pub fn flatten_columns(&mut self) {
        for column in &mut self.columns {
            column.levels.truncate(1);
        }
    }

    /// Look up a single-level column by name (case-insensitive).
    ///
    /// Hierarchical names never match; flatten first.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.levels.len() == 1 && c.levels[0].eq_ignore_ascii_case(name))
            .map(|c| c.values.as_slice())
    }

    /// Read every row in index order.
    ///
    /// `open`, `high`, `low` and `close` are required columns and must have a
    /// finite value on every row. `volume` is optional.
    pub fn rows(&self) -> Result<Vec<PriceRow>, DataError> {
        let required = |name: &str| {
            self.column(name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };
        let open = required("open")?;
        let high = required("high")?;
        let low = required("low")?;
        let close = required("close")?;
        let volume = self.column("volume");

        // NaN and infinities count as missing.
        let price = |values: &[Option<f64>], field: &str, i: usize| {
            values[i].filter(|v| v.is_finite()).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!(
                    "missing {field} on {}",
                    self.index[i]
                ))
            })
        };

        self.index
            .iter()
            .enumerate()
            .map(|(i, &date)| -> Result<PriceRow, DataError> {
                Ok(PriceRow {
                    date,
                    open: price(open, "open", i)?,
                    high: price(high, "high", i)?,
                    low: price(low, "low", i)?,
                    close: price(close, "close", i)?,
                    volume: volume.and_then(|v| v[i]),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 2 + i).unwrap())
            .collect()
    }

    fn flat_table() -> PriceTable {
        PriceTable::new(dates(2))
            .with_column(["Open"], vec![Some(1.0), Some(2.0)])
            .unwrap()
            .with_column(["High"], vec![Some(1.5), Some(2.5)])
            .unwrap()
            .with_column(["Low"], vec![Some(0.5), Some(1.5)])
            .unwrap()
            .with_column(["Close"], vec![Some(1.2), Some(2.2)])
            .unwrap()
            .with_column(["Volume"], vec![Some(100.0), None])
            .unwrap()
    }

    #[test]
    fn rejects_misaligned_column() {
        let err = PriceTable::new(dates(3))
            .with_column(["Open"], vec![Some(1.0)])
            .unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn reads_rows_in_order() {
        let rows = flat_table().rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].open, 1.0);
        assert_eq!(rows[1].close, 2.2);
        assert_eq!(rows[0].volume, Some(100.0));
        assert_eq!(rows[1].volume, None);
    }

    #[test]
    fn hierarchical_columns_need_flattening() {
        let mut table = PriceTable::new(dates(1));
        for field in ["Close", "High", "Low", "Open", "Volume"] {
            table.push_column([field, "AAPL"], vec![Some(10.0)]).unwrap();
        }
        assert!(table.is_hierarchical());
        assert!(matches!(table.rows(), Err(DataError::MissingColumn(_))));

        table.flatten_columns();
        assert!(!table.is_hierarchical());
        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].high, 10.0);
    }

    #[test]
    fn volume_column_is_optional() {
        let table = PriceTable::new(dates(1))
            .with_column(["open"], vec![Some(1.0)])
            .unwrap()
            .with_column(["high"], vec![Some(1.0)])
            .unwrap()
            .with_column(["low"], vec![Some(1.0)])
            .unwrap()
            .with_column(["close"], vec![Some(1.0)])
            .unwrap();
        assert_eq!(table.rows().unwrap()[0].volume, None);
    }

    #[test]
    fn missing_price_is_an_error() {
        let table = PriceTable::new(dates(1))
            .with_column(["open"], vec![None])
            .unwrap()
            .with_column(["high"], vec![Some(1.0)])
            .unwrap()
            .with_column(["low"], vec![Some(1.0)])
            .unwrap()
            .with_column(["close"], vec![Some(1.0)])
            .unwrap();
        assert!(matches!(
            table.rows(),
            Err(DataError::ResponseFormatChanged(_))
        ));
    }

    #[test]
    fn non_finite_price_is_an_error() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let table = PriceTable::new(dates(1))
                .with_column(["open"], vec![Some(bad)])
                .unwrap()
                .with_column(["high"], vec![Some(1.0)])
                .unwrap()
                .with_column(["low"], vec![Some(1.0)])
                .unwrap()
                .with_column(["close"], vec![Some(1.0)])
                .unwrap();
            match table.rows() {
                Err(DataError::ResponseFormatChanged(msg)) => {
                    assert!(msg.starts_with("missing open on"), "{msg}")
                }
                other => panic!("expected missing open, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_table() {
        let table = PriceTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
