//! Reshaping of enriched rows into wide-form pivot tables.
//!
//! A pivot is described by a row axis, a column axis and a value field.
//! Rows whose column label (or row key) is undefined are not placed in the
//! table; their input positions are returned so the run can report them.

pub mod axes;
pub mod table;

pub use axes::{ColumnAxis, RowAxis, ValueField};
pub use table::{ColumnKey, PivotCell, PivotEntry, PivotTable, RowKey};

use crate::enricher::EnrichedRow;
use log::debug;
use serde::{Deserialize, Serialize};

/// Axes and value of a pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PivotSpec {
    pub row_axis: RowAxis,
    pub column_axis: ColumnAxis,
    pub value: ValueField,
}

/// A pivot table plus the rows that could not be placed in it
#[derive(Debug, Clone, PartialEq)]
pub struct PivotOutcome {
    pub table: PivotTable,
    /// Input positions of rows without a row key or column label
    pub unplaced: Vec<usize>,
}

/// Pivot enriched rows by the given spec
pub fn pivot_rows(rows: &[EnrichedRow], spec: &PivotSpec) -> PivotOutcome {
    let mut unplaced = Vec::new();
    let mut entries = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        match (spec.row_axis.key(row), spec.column_axis.key(row)) {
            (Some(key), Some(column)) => {
                entries.push(PivotEntry::new(key, column, spec.value.value(row)));
            }
            _ => unplaced.push(idx),
        }
    }

    let table = PivotTable::build(entries);

    debug!(
        "Pivoted {} rows into {}x{} table ({} unplaced)",
        rows.len(),
        table.rows.len(),
        table.columns.len(),
        unplaced.len()
    );

    PivotOutcome { table, unplaced }
}
