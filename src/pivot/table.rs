//! Long-form to wide-form reshaping.
//!
//! A pivot table is built once from (row key, column, value) entries and is
//! immutable afterwards. Each (row, column) pair is expected to be observed
//! once; repeated observations keep the last value and are counted on the
//! cell so callers can report them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Numeric row-axis value with a total order
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub f64);

impl PartialEq for RowKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RowKey {}

impl PartialOrd for RowKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RowKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Column category: ordered by rank, then label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnKey {
    pub rank: i64,
    pub label: String,
}

impl ColumnKey {
    pub fn new(rank: i64, label: impl Into<String>) -> Self {
        Self {
            rank,
            label: label.into(),
        }
    }

    /// Column with no natural order; sorts by label
    #[cfg(test)]
    pub(crate) fn unranked(label: impl Into<String>) -> Self {
        Self::new(0, label)
    }
}

/// One long-form observation
#[derive(Debug, Clone, PartialEq)]
pub struct PivotEntry {
    pub row: RowKey,
    pub column: ColumnKey,
    pub value: Option<f64>,
}

impl PivotEntry {
    pub fn new(row: f64, column: ColumnKey, value: Option<f64>) -> Self {
        Self {
            row: RowKey(row),
            column,
            value,
        }
    }
}

/// One wide-form cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PivotCell {
    /// Selected value; `None` is "no data"
    pub value: Option<f64>,
    /// Number of entries written to this cell (more than one is ambiguous)
    pub observations: usize,
}

impl PivotCell {
    pub fn is_ambiguous(&self) -> bool {
        self.observations > 1
    }
}

/// Wide-form table keyed by (row key, column label)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    /// Sorted distinct row keys
    pub rows: Vec<f64>,
    /// Observed column labels in rank order
    pub columns: Vec<String>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<PivotCell>>,
}

impl PivotTable {
    /// Build from long-form entries; last write wins on collisions
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PivotEntry>,
    {
        let mut observed: BTreeMap<(RowKey, ColumnKey), PivotCell> = BTreeMap::new();
        let mut row_keys: BTreeSet<RowKey> = BTreeSet::new();
        let mut column_keys: BTreeSet<ColumnKey> = BTreeSet::new();

        for entry in entries {
            row_keys.insert(entry.row);
            column_keys.insert(entry.column.clone());

            let cell = observed.entry((entry.row, entry.column)).or_default();
            cell.value = entry.value;
            cell.observations += 1;
        }

        let rows: Vec<RowKey> = row_keys.into_iter().collect();
        let columns: Vec<ColumnKey> = column_keys.into_iter().collect();

        let cells = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        observed
                            .get(&(*row, col.clone()))
                            .copied()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: rows.into_iter().map(|r| r.0).collect(),
            columns: columns.into_iter().map(|c| c.label).collect(),
            cells,
        }
    }

    fn position(&self, row: f64, column: &str) -> Option<(usize, usize)> {
        let r = self.rows.iter().position(|k| RowKey(*k) == RowKey(row))?;
        let c = self.columns.iter().position(|l| l == column)?;
        Some((r, c))
    }

    /// Cell at (row, column), if both exist in the table
    pub fn cell(&self, row: f64, column: &str) -> Option<&PivotCell> {
        let (r, c) = self.position(row, column)?;
        self.cells.get(r).and_then(|cells| cells.get(c))
    }

    /// Value at (row, column); `None` is "no data"
    pub fn value(&self, row: f64, column: &str) -> Option<f64> {
        self.cell(row, column).and_then(|c| c.value)
    }

    /// Number of cells that received more than one entry
    pub fn ambiguous_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_ambiguous()).count()
    }

    /// Number of cells without a value (unobserved or "no data")
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.value.is_none()).count()
    }

    /// Long-form (row, column, value) triples of every observed cell
    pub fn unpivot(&self) -> Vec<(f64, String, Option<f64>)> {
        let mut triples = Vec::new();
        for (row, cells) in self.rows.iter().zip(&self.cells) {
            for (column, cell) in self.columns.iter().zip(cells) {
                if cell.observations > 0 {
                    triples.push((*row, column.clone(), cell.value));
                }
            }
        }
        triples
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(row: f64, column: &str, value: f64) -> PivotEntry {
        PivotEntry::new(row, ColumnKey::unranked(column), Some(value))
    }

    #[test]
    fn test_pivot_fills_missing_pairs_with_no_data() {
        let table = PivotTable::build(vec![
            entry(1.0, "A", 10.0),
            entry(1.0, "B", 20.0),
            entry(2.0, "A", 30.0),
        ]);

        assert_eq!(table.rows, vec![1.0, 2.0]);
        assert_eq!(table.columns, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(table.value(1.0, "A"), Some(10.0));
        assert_eq!(table.value(1.0, "B"), Some(20.0));
        assert_eq!(table.value(2.0, "A"), Some(30.0));
        assert_eq!(table.value(2.0, "B"), None);
        assert_eq!(table.cell(2.0, "B").unwrap().observations, 0);
        assert_eq!(table.empty_cells(), 1);
    }

    #[test]
    fn test_rows_sorted_and_columns_ranked() {
        let table = PivotTable::build(vec![
            PivotEntry::new(12.0, ColumnKey::new(i64::MAX, "Fully Assoc."), Some(1.0)),
            PivotEntry::new(10.0, ColumnKey::new(1, "Direct Mapped"), Some(2.0)),
            PivotEntry::new(11.0, ColumnKey::new(2, "2-way Set Assoc."), Some(3.0)),
        ]);

        assert_eq!(table.rows, vec![10.0, 11.0, 12.0]);
        assert_eq!(
            table.columns,
            vec!["Direct Mapped", "2-way Set Assoc.", "Fully Assoc."]
        );
    }

    #[test]
    fn test_collision_is_last_write_wins_and_flagged() {
        let table = PivotTable::build(vec![
            entry(1.0, "A", 10.0),
            entry(1.0, "A", 99.0),
            entry(2.0, "A", 30.0),
        ]);

        let cell = table.cell(1.0, "A").unwrap();
        assert_eq!(cell.value, Some(99.0));
        assert_eq!(cell.observations, 2);
        assert!(cell.is_ambiguous());
        assert_eq!(table.ambiguous_cells(), 1);
    }

    #[test]
    fn test_no_data_value_stays_no_data() {
        let table = PivotTable::build(vec![PivotEntry::new(1.0, ColumnKey::unranked("A"), None)]);

        let cell = table.cell(1.0, "A").unwrap();
        assert_eq!(cell.value, None);
        assert_eq!(cell.observations, 1);
    }

    #[test]
    fn test_unpivot_round_trip_on_full_coverage() {
        let mut original = vec![
            (1.0, "A".to_string(), Some(10.0)),
            (1.0, "B".to_string(), Some(20.0)),
            (2.0, "A".to_string(), Some(30.0)),
            (2.0, "B".to_string(), Some(40.0)),
            (3.0, "A".to_string(), None),
            (3.0, "B".to_string(), Some(60.0)),
        ];

        let table = PivotTable::build(
            original
                .iter()
                .rev()
                .map(|(r, c, v)| PivotEntry::new(*r, ColumnKey::unranked(c.clone()), *v)),
        );

        let mut round_trip = table.unpivot();
        let order = |a: &(f64, String, Option<f64>), b: &(f64, String, Option<f64>)| {
            a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
        };
        original.sort_by(order);
        round_trip.sort_by(order);

        assert_eq!(round_trip, original);
    }

    #[test]
    fn test_empty_table() {
        let table = PivotTable::build(Vec::new());
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
        assert!(table.unpivot().is_empty());
    }

    #[test]
    fn test_row_key_order_handles_fractions() {
        let mut keys = vec![RowKey(11.5), RowKey(10.0), RowKey(11.0)];
        keys.sort();
        assert_eq!(keys, vec![RowKey(10.0), RowKey(11.0), RowKey(11.5)]);
    }
}
