//! Partitions a mixed-resolution table and runs the pipeline per partition.

use rayon::prelude::*;

use crate::domain::errors::IndicatorError;
use crate::domain::market::table::BarTable;

use super::pipeline::apply_technical_indicators;

/// Applies the full indicator pipeline independently to each resolution
/// partition of `table` and reassembles the results.
///
/// Rows are partitioned by their value in `tag_column`, each partition
/// keeping its internal row order exactly as encountered, so no rolling or
/// recursive state ever crosses a partition boundary. Partitions are
/// mutually independent and computed in parallel.
///
/// Reassembly follows `canonical_order`, never the lexical order of the
/// tags ("15m" sorts before "5m" as a string). Tags present in the table
/// but absent from `canonical_order` are dropped from the output with a
/// warning.
pub fn apply_by_resolution(
    table: &BarTable,
    tag_column: &str,
    canonical_order: &[&str],
) -> Result<BarTable, IndicatorError> {
    let tags = table
        .text_column(tag_column)
        .ok_or_else(|| IndicatorError::MissingResolutionColumn {
            column: tag_column.to_string(),
        })?;

    // Partition row indices by tag, first-encounter order.
    let mut partitions: Vec<(String, Vec<usize>)> = Vec::new();
    for (row, tag) in tags.iter().enumerate() {
        match partitions.iter_mut().find(|(t, _)| t == tag) {
            Some((_, rows)) => rows.push(row),
            None => partitions.push((tag.clone(), vec![row])),
        }
    }

    let mut computed = partitions
        .par_iter()
        .map(|(tag, rows)| {
            apply_technical_indicators(&table.select_rows(rows)).map(|t| (tag.clone(), t))
        })
        .collect::<Result<Vec<_>, IndicatorError>>()?;

    let mut ordered = Vec::with_capacity(computed.len());
    for &tag in canonical_order {
        if let Some(pos) = computed.iter().position(|(t, _)| t == tag) {
            ordered.push(computed.remove(pos).1);
        }
    }
    for (tag, _) in &computed {
        tracing::warn!(%tag, "resolution tag not in canonical order; rows dropped");
    }

    BarTable::concat(ordered)
}
