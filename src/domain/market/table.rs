use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::errors::IndicatorError;
use crate::domain::market::bar::Bar;
use crate::domain::market::fields::Field;

/// A single typed column of a [`BarTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Bool(Vec<bool>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Float(v) => Column::Float(rows.iter().map(|&i| v[i]).collect()),
            Column::Int(v) => Column::Int(rows.iter().map(|&i| v[i]).collect()),
            Column::Bool(v) => Column::Bool(rows.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(rows.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// Appends `other` in place; returns false on a type mismatch.
    fn append(&mut self, other: &Column) -> bool {
        match (self, other) {
            (Column::Float(a), Column::Float(b)) => a.extend_from_slice(b),
            (Column::Int(a), Column::Int(b)) => a.extend_from_slice(b),
            (Column::Bool(a), Column::Bool(b)) => a.extend_from_slice(b),
            (Column::Text(a), Column::Text(b)) => a.extend_from_slice(b),
            _ => return false,
        }
        true
    }
}

/// An ordered set of named, equal-length columns over a bar series.
///
/// Rows keep the order the upstream source produced (ascending timestamp).
/// Column insertion order is preserved, so derived columns appear after the
/// raw ones in the order they were pushed. Float columns use `f64::NAN` as
/// the no-data marker; that is what "undefined" means everywhere in the
/// indicator layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarTable {
    columns: Vec<(String, Column)>,
}

impl BarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the canonical six-column table from a slice of bars.
    ///
    /// Decimal prices are converted to `f64` here; a value that does not fit
    /// becomes NaN and flows through the pipeline as undefined.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let floats = |f: fn(&Bar) -> Decimal| {
            Column::Float(
                bars.iter()
                    .map(|b| f(b).to_f64().unwrap_or(f64::NAN))
                    .collect(),
            )
        };
        BarTable {
            columns: vec![
                (
                    "timestamp".to_string(),
                    Column::Int(bars.iter().map(|b| b.timestamp).collect()),
                ),
                ("Open".to_string(), floats(|b| b.open)),
                ("High".to_string(), floats(|b| b.high)),
                ("Low".to_string(), floats(|b| b.low)),
                ("Close".to_string(), floats(|b| b.close)),
                ("Volume".to_string(), floats(|b| b.volume)),
            ],
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn float_column(&self, name: &str) -> Option<&[f64]> {
        match self.column(name) {
            Some(Column::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn bool_column(&self, name: &str) -> Option<&[bool]> {
        match self.column(name) {
            Some(Column::Bool(v)) => Some(v),
            _ => None,
        }
    }

    pub fn text_column(&self, name: &str) -> Option<&[String]> {
        match self.column(name) {
            Some(Column::Text(v)) => Some(v),
            _ => None,
        }
    }

    /// Appends a column; the name must be new and the length must match.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), IndicatorError> {
        let name = name.into();
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(IndicatorError::ColumnLengthMismatch {
                column: name,
                expected: self.len(),
                actual: column.len(),
            });
        }
        if self.column(&name).is_some() {
            return Err(IndicatorError::DuplicateColumn { column: name });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// Resolves a semantic field to its float data through the field's
    /// candidate list. Candidates of the wrong column type are skipped.
    pub fn resolve(&self, field: Field) -> Result<&[f64], IndicatorError> {
        for candidate in field.candidates() {
            if let Some(values) = self.float_column(candidate) {
                return Ok(values);
            }
        }
        Err(IndicatorError::MissingColumn {
            field: field.name(),
            candidates: field.candidates(),
        })
    }

    /// New table containing the given rows, in the given order, with the
    /// full column set.
    pub fn select_rows(&self, rows: &[usize]) -> BarTable {
        BarTable {
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.select(rows)))
                .collect(),
        }
    }

    /// Concatenates tables row-wise. Every part must carry the same columns
    /// in the same order with matching types.
    pub fn concat(parts: Vec<BarTable>) -> Result<BarTable, IndicatorError> {
        let mut iter = parts.into_iter();
        let mut base = match iter.next() {
            Some(table) => table,
            None => return Ok(BarTable::new()),
        };
        for part in iter {
            if part.columns.len() != base.columns.len() {
                return Err(IndicatorError::SchemaMismatch {
                    reason: format!(
                        "expected {} columns, got {}",
                        base.columns.len(),
                        part.columns.len()
                    ),
                });
            }
            for ((base_name, base_col), (name, col)) in
                base.columns.iter_mut().zip(part.columns.iter())
            {
                if base_name != name || !base_col.append(col) {
                    return Err(IndicatorError::SchemaMismatch {
                        reason: format!("column '{name}' does not line up with '{base_name}'"),
                    });
                }
            }
        }
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(close: Decimal, ts: i64) -> Bar {
        Bar {
            open: close,
            high: close,
            low: close,
            close,
            volume: dec!(100),
            timestamp: ts,
        }
    }

    #[test]
    fn test_from_bars_shape() {
        let table = BarTable::from_bars(&[bar(dec!(10), 0), bar(dec!(11), 60_000)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(Field::Close).unwrap(), &[10.0, 11.0]);
        assert_eq!(table.resolve(Field::Volume).unwrap(), &[100.0, 100.0]);
    }

    #[test]
    fn test_resolve_precedence_prefers_first_candidate() {
        let mut table = BarTable::new();
        table
            .push_column("Close", Column::Float(vec![1.0, 2.0]))
            .unwrap();
        table
            .push_column("close", Column::Float(vec![3.0, 4.0]))
            .unwrap();
        // "close" outranks "Close" regardless of insertion order
        assert_eq!(table.resolve(Field::Close).unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_resolve_missing_column() {
        let mut table = BarTable::new();
        table
            .push_column("Close", Column::Float(vec![1.0]))
            .unwrap();
        let err = table.resolve(Field::Volume).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::MissingColumn { field: "volume", .. }
        ));
    }

    #[test]
    fn test_push_column_length_mismatch() {
        let mut table = BarTable::new();
        table
            .push_column("close", Column::Float(vec![1.0, 2.0]))
            .unwrap();
        let err = table
            .push_column("Volume", Column::Float(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, IndicatorError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_push_column_duplicate() {
        let mut table = BarTable::new();
        table.push_column("close", Column::Float(vec![1.0])).unwrap();
        let err = table
            .push_column("close", Column::Float(vec![2.0]))
            .unwrap_err();
        assert!(matches!(err, IndicatorError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_select_rows_keeps_order_and_schema() {
        let mut table = BarTable::new();
        table
            .push_column("close", Column::Float(vec![1.0, 2.0, 3.0, 4.0]))
            .unwrap();
        table
            .push_column(
                "Interval",
                Column::Text(vec![
                    "5m".to_string(),
                    "60m".to_string(),
                    "5m".to_string(),
                    "60m".to_string(),
                ]),
            )
            .unwrap();
        let sub = table.select_rows(&[0, 2]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.float_column("close").unwrap(), &[1.0, 3.0]);
        assert_eq!(
            sub.text_column("Interval").unwrap(),
            &["5m".to_string(), "5m".to_string()]
        );
    }

    #[test]
    fn test_concat_round_trip() {
        let mut table = BarTable::new();
        table
            .push_column("close", Column::Float(vec![1.0, 2.0, 3.0]))
            .unwrap();
        let a = table.select_rows(&[0, 1]);
        let b = table.select_rows(&[2]);
        let joined = BarTable::concat(vec![a, b]).unwrap();
        assert_eq!(joined, table);
    }

    #[test]
    fn test_concat_schema_mismatch() {
        let mut a = BarTable::new();
        a.push_column("close", Column::Float(vec![1.0])).unwrap();
        let mut b = BarTable::new();
        b.push_column("Close", Column::Float(vec![2.0])).unwrap();
        assert!(matches!(
            BarTable::concat(vec![a, b]),
            Err(IndicatorError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_concat_empty_is_empty_table() {
        let joined = BarTable::concat(vec![]).unwrap();
        assert!(joined.is_empty());
    }
}
