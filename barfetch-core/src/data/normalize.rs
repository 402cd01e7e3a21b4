//! Normalizer: price table rows to the on-disk bar schema.

use super::provider::DataError;
use super::table::PriceTable;
use crate::domain::{coerce_volume, round_price, AssetSeries, DailyBar, Period};
use chrono::NaiveDate;

/// Map every row of a flattened table, in order, to a [`DailyBar`].
///
/// An empty table is [`DataError::NoData`]: the ticker fails and nothing is written.
pub fn normalize(table: &PriceTable) -> Result<Vec<DailyBar>, DataError> {
    if table.is_empty() {
        return Err(DataError::NoData);
    }

    let bars = table
        .rows()?
        .into_iter()
        .enumerate()
        .map(|(day, row)| DailyBar {
            day,
            date: row.date,
            open: round_price(row.open),
            high: round_price(row.high),
            low: round_price(row.low),
            close: round_price(row.close),
            volume: coerce_volume(row.volume),
        })
        .collect();

    Ok(bars)
}

/// Wrap normalized bars into the per-ticker document.
///
/// `period.start` is the requested start, not the first bar's date.
pub fn build_series(
    ticker: &str,
    name: &str,
    requested_start: NaiveDate,
    bars: Vec<DailyBar>,
) -> Result<AssetSeries, DataError> {
    let end = bars.last().map(|b| b.date).ok_or(DataError::NoData)?;
    Ok(AssetSeries {
        ticker: ticker.to_string(),
        name: name.to_string(),
        period: Period {
            start: requested_start,
            end,
            days: bars.len(),
        },
        ohlc: bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table(volumes: Vec<Option<f64>>) -> PriceTable {
        let n = volumes.len();
        let index = (0..n).map(|i| d(2020, 3, 2 + i as u32)).collect();
        let prices = |base: f64| -> Vec<Option<f64>> {
            (0..n).map(|i| Some(base + i as f64 * 0.333)).collect()
        };
        PriceTable::new(index)
            .with_column(["Open"], prices(10.004))
            .unwrap()
            .with_column(["High"], prices(11.006))
            .unwrap()
            .with_column(["Low"], prices(9.001))
            .unwrap()
            .with_column(["Close"], prices(10.556))
            .unwrap()
            .with_column(["Volume"], volumes)
            .unwrap()
    }

    #[test]
    fn empty_table_is_no_data() {
        assert!(matches!(
            normalize(&PriceTable::empty()),
            Err(DataError::NoData)
        ));
    }

    #[test]
    fn day_index_is_position() {
        let bars = normalize(&table(vec![Some(1.0); 5])).unwrap();
        let days: Vec<usize> = bars.iter().map(|b| b.day).collect();
        assert_eq!(days, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn prices_are_rounded() {
        let bars = normalize(&table(vec![Some(1.0); 2])).unwrap();
        assert_eq!(bars[0].open, 10.0);
        assert_eq!(bars[0].high, 11.01);
        assert_eq!(bars[0].low, 9.0);
        assert_eq!(bars[0].close, 10.56);
        assert_eq!(bars[1].open, 10.34);
    }

    #[test]
    fn missing_volume_becomes_zero() {
        let bars = normalize(&table(vec![Some(500.0), None, Some(f64::NAN)])).unwrap();
        assert_eq!(bars[0].volume, 500);
        assert_eq!(bars[1].volume, 0);
        assert_eq!(bars[2].volume, 0);
    }

    #[test]
    fn nan_price_never_reaches_a_bar() {
        let index = vec![d(2020, 1, 2)];
        let table = PriceTable::new(index)
            .with_column(["Open"], vec![Some(f64::NAN)])
            .unwrap()
            .with_column(["High"], vec![Some(1.0)])
            .unwrap()
            .with_column(["Low"], vec![Some(1.0)])
            .unwrap()
            .with_column(["Close"], vec![Some(1.0)])
            .unwrap();
        assert!(matches!(
            normalize(&table),
            Err(DataError::ResponseFormatChanged(_))
        ));
    }

    #[test]
    fn series_period_uses_requested_start() {
        let bars = normalize(&table(vec![None; 3])).unwrap();
        let series = build_series("AAPL", "Apple Inc.", d(2000, 1, 1), bars).unwrap();
        assert_eq!(series.period.start, d(2000, 1, 1));
        assert_eq!(series.period.end, d(2020, 3, 4));
        assert_eq!(series.period.days, 3);
        assert_eq!(series.ohlc.len(), series.period.days);
    }

    #[test]
    fn series_without_bars_is_no_data() {
        assert!(matches!(
            build_series("X", "X", d(2000, 1, 1), Vec::new()),
            Err(DataError::NoData)
        ));
    }
}
