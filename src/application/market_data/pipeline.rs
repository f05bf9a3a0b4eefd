//! Orchestrates the full indicator battery over a single-resolution table.

use crate::domain::errors::IndicatorError;
use crate::domain::market::fields::Field;
use crate::domain::market::table::{BarTable, Column};

use super::rolling::rolling_mean;
use super::technical_indicators::{
    atr, bollinger, divergence, historical_volatility, macd, obv, rsi, vwap,
};

/// Computes every indicator column and returns a new table with them
/// appended after the input columns, in a fixed order. The input table is
/// borrowed read-only and never mutated.
///
/// All required fields are resolved before anything is computed, so a
/// missing column fails fast without producing a half-augmented table.
/// Short series are not an error: positions without enough look-back are
/// simply NaN (false for the divergence flag).
pub fn apply_technical_indicators(table: &BarTable) -> Result<BarTable, IndicatorError> {
    let close = table.resolve(Field::Close)?;
    let high = table.resolve(Field::High)?;
    let low = table.resolve(Field::Low)?;
    let volume = table.resolve(Field::Volume)?;

    tracing::debug!(rows = table.len(), "applying technical indicators");

    let (macd_line, macd_signal, macd_hist) = macd(close, 12, 26, 9);
    let (bb_mid, bb_up, bb_down) = bollinger(close, 20, 2.0);
    let obv_series = obv(close, volume);
    let divergence_series = divergence(close, &obv_series, 20);

    let mut out = table.clone();
    out.push_column("MA_5", Column::Float(rolling_mean(close, 5)))?;
    out.push_column("MA_20", Column::Float(rolling_mean(close, 20)))?;
    out.push_column("MA_60", Column::Float(rolling_mean(close, 60)))?;
    out.push_column("RSI_14", Column::Float(rsi(close, 14)))?;
    out.push_column("MACD_Line", Column::Float(macd_line))?;
    out.push_column("MACD_Signal", Column::Float(macd_signal))?;
    out.push_column("MACD_Hist", Column::Float(macd_hist))?;
    out.push_column("HV_20", Column::Float(historical_volatility(close, 20, 252.0)))?;
    out.push_column("BB_MID", Column::Float(bb_mid))?;
    out.push_column("BB_UP", Column::Float(bb_up))?;
    out.push_column("BB_DOWN", Column::Float(bb_down))?;
    out.push_column("ATR_14", Column::Float(atr(high, low, close, 14)))?;
    out.push_column("OBV", Column::Float(obv_series))?;
    out.push_column("VWAP", Column::Float(vwap(close, volume)))?;
    out.push_column("Divergence_20", Column::Bool(divergence_series))?;
    Ok(out)
}

/// Names of the derived columns, in the order the pipeline appends them.
pub const DERIVED_COLUMNS: [&str; 15] = [
    "MA_5",
    "MA_20",
    "MA_60",
    "RSI_14",
    "MACD_Line",
    "MACD_Signal",
    "MACD_Hist",
    "HV_20",
    "BB_MID",
    "BB_UP",
    "BB_DOWN",
    "ATR_14",
    "OBV",
    "VWAP",
    "Divergence_20",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_close(close: Vec<f64>) -> BarTable {
        let n = close.len();
        let mut table = BarTable::new();
        table
            .push_column("High", Column::Float(close.iter().map(|c| c + 1.0).collect()))
            .unwrap();
        table
            .push_column("Low", Column::Float(close.iter().map(|c| c - 1.0).collect()))
            .unwrap();
        table.push_column("Close", Column::Float(close)).unwrap();
        table
            .push_column("Volume", Column::Float(vec![1000.0; n]))
            .unwrap();
        table
    }

    #[test]
    fn test_appends_all_columns_in_order() {
        let table = table_with_close((0..70).map(|i| 100.0 + i as f64).collect());
        let out = apply_technical_indicators(&table).unwrap();
        let names: Vec<&str> = out.column_names().collect();
        assert_eq!(&names[..4], &["High", "Low", "Close", "Volume"]);
        assert_eq!(&names[4..], DERIVED_COLUMNS);
        assert_eq!(out.len(), table.len());
    }

    #[test]
    fn test_input_not_mutated() {
        let table = table_with_close(vec![10.0, 11.0, 12.0]);
        let before = table.clone();
        apply_technical_indicators(&table).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_missing_close_fails_fast() {
        let mut table = BarTable::new();
        table
            .push_column("High", Column::Float(vec![1.0]))
            .unwrap();
        table.push_column("Low", Column::Float(vec![1.0])).unwrap();
        table
            .push_column("Volume", Column::Float(vec![1.0]))
            .unwrap();
        let err = apply_technical_indicators(&table).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::MissingColumn { field: "close", .. }
        ));
    }

    #[test]
    fn test_short_series_is_partial_not_error() {
        let table = table_with_close(vec![10.0, 11.0, 12.0]);
        let out = apply_technical_indicators(&table).unwrap();
        // not enough history for any 20-window column
        assert!(out.float_column("MA_20").unwrap().iter().all(|v| v.is_nan()));
        assert!(out.float_column("BB_MID").unwrap().iter().all(|v| v.is_nan()));
        // but the anchored EMAs are defined from the first row
        assert!(out.float_column("MACD_Line").unwrap().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_alias_resolution_finmind_names() {
        let n = 25;
        let mut table = BarTable::new();
        table
            .push_column("close", Column::Float((0..n).map(|i| 50.0 + i as f64).collect()))
            .unwrap();
        table
            .push_column("max", Column::Float((0..n).map(|i| 51.0 + i as f64).collect()))
            .unwrap();
        table
            .push_column("min", Column::Float((0..n).map(|i| 49.0 + i as f64).collect()))
            .unwrap();
        table
            .push_column("Trading_Volume", Column::Float(vec![500.0; n as usize]))
            .unwrap();
        let out = apply_technical_indicators(&table).unwrap();
        assert_eq!(out.len(), n as usize);
        assert!(out.float_column("RSI_14").is_some());
    }
}
