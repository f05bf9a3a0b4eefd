use thiserror::Error;

/// Errors surfaced by table construction and the indicator pipeline
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("no column resolves to required field '{field}' (candidates: {candidates:?})")]
    MissingColumn {
        field: &'static str,
        candidates: &'static [&'static str],
    },

    #[error("resolution column '{column}' not found")]
    MissingResolutionColumn { column: String },

    #[error("column '{column}' has {actual} rows, table has {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    #[error("cannot concatenate tables: {reason}")]
    SchemaMismatch { reason: String },
}
