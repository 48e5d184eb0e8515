//! Top-N ranking of counter tables
//!
//! Ranking is deterministic: higher counts first, equal counts ordered by
//! the cluster text so hash map iteration order never leaks into a report.

use log::warn;
use serde::Serialize;

use crate::core::aggregator::CounterTable;
use crate::core::window::MAX_WINDOW;

/// Hard ceiling on the number of rows per report
pub const MAX_TOP: usize = 50;

/// Default number of rows per report
pub const DEFAULT_TOP: usize = 10;

/// Width used for a column that has no entries
pub const EMPTY_COLUMN_WIDTH: usize = 1;

/// A cluster selected for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub cluster: String,
    pub count: u64,
}

/// Ranked rows of one table, one column per cluster length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// `columns[0]` holds singles, `columns[1]` pairs, `columns[2]` triples
    pub columns: [Vec<RankedRow>; MAX_WINDOW],
}

impl Ranking {
    /// Rank every cluster length of `table`
    pub fn from_table(table: &CounterTable, rows: usize) -> Self {
        let columns = [
            top_clusters(table, 1, rows),
            top_clusters(table, 2, rows),
            top_clusters(table, 3, rows),
        ];
        Self { columns }
    }

    /// Display width of each column's count field
    pub fn count_widths(&self) -> [usize; MAX_WINDOW] {
        [
            column_width(&self.columns[0]),
            column_width(&self.columns[1]),
            column_width(&self.columns[2]),
        ]
    }
}

/// Select the `n` most frequent clusters of length `len`
///
/// # Arguments
///
/// * `table` - Counter table to rank
/// * `len` - Cluster length in characters
/// * `n` - Maximum number of rows
///
/// # Returns
///
/// At most `n` rows sorted by count descending, ties by cluster ascending
pub fn top_clusters(table: &CounterTable, len: usize, n: usize) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = table
        .iter()
        .filter(|(cluster, _)| cluster.chars().count() == len)
        .map(|(cluster, count)| RankedRow {
            cluster: cluster.to_string(),
            count,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.cluster.cmp(&b.cluster)));
    rows.truncate(n);
    rows
}

/// Digit width of the largest count in a ranked column
///
/// Rows are sorted descending so the first one is the largest. An empty
/// column falls back to `EMPTY_COLUMN_WIDTH`.
pub fn column_width(rows: &[RankedRow]) -> usize {
    rows.first()
        .map(|row| digit_width(row.count))
        .unwrap_or(EMPTY_COLUMN_WIDTH)
}

pub(crate) fn digit_width(value: u64) -> usize {
    value.to_string().len()
}

/// Clamp a requested row count into `1..=MAX_TOP`
pub fn clamp_top(requested: usize) -> usize {
    let clamped = requested.clamp(1, MAX_TOP);
    if clamped != requested {
        warn!("Requested top {} adjusted to {}", requested, clamped);
    }
    clamped
}
