//! Run-level counts of every non-fatal condition.
//!
//! Lookup misses, ambiguous lookups, pivot collisions and unplaced rows never
//! abort a run. They are statuses on rows and cells; this module tallies
//! them so they can be logged, reported and checked against the policy.

use super::config::PipelineConfig;
use crate::enricher::{EnrichedRow, LookupStatus};
use crate::metrics::Formula;
use crate::pivot::PivotOutcome;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lookup outcomes for one hierarchy level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupCounts {
    pub hits: usize,
    pub misses: usize,
    pub ambiguous: usize,
    pub absent: usize,
}

impl LookupCounts {
    fn record(&mut self, status: LookupStatus) {
        match status {
            LookupStatus::Hit => self.hits += 1,
            LookupStatus::Miss => self.misses += 1,
            LookupStatus::Ambiguous { .. } => self.ambiguous += 1,
            LookupStatus::Absent => self.absent += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.hits + self.misses + self.ambiguous + self.absent
    }
}

/// Diagnostics of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Lookup counts keyed by level name (`l1`, `l2`, `victim`)
    pub lookups: BTreeMap<String, LookupCounts>,
    /// Rows whose derived AAT is "no data"
    pub rows_without_aat: usize,
    /// Pivot cells written more than once
    pub ambiguous_cells: usize,
    /// Pivot cells holding "no data"
    pub empty_cells: usize,
    /// Input positions of rows left out of the pivot (no row key or label)
    pub unplaced_rows: Vec<usize>,
}

impl Diagnostics {
    /// Tally the statuses of an enriched dataset and its pivot
    ///
    /// A level's lookup statuses are only counted when the run reads that
    /// level's table, and missing AAT only when a formula is selected.
    pub fn collect(rows: &[EnrichedRow], outcome: &PivotOutcome, config: &PipelineConfig) -> Self {
        let cache_lookups = config.needs_characteristics();
        let victim_lookups = config.needs_victim_characteristics();

        let mut lookups: BTreeMap<String, LookupCounts> = BTreeMap::new();
        for row in rows {
            for (level, status) in row.lookups() {
                let counted = if level == "victim" { victim_lookups } else { cache_lookups };
                if counted {
                    lookups.entry(level.to_string()).or_default().record(status);
                }
            }
        }

        let rows_without_aat = if config.formula != Formula::None {
            rows.iter().filter(|r| r.aat.is_none()).count()
        } else {
            0
        };

        Self {
            lookups,
            rows_without_aat,
            ambiguous_cells: outcome.table.ambiguous_cells(),
            empty_cells: outcome.table.empty_cells(),
            unplaced_rows: outcome.unplaced.clone(),
        }
    }

    pub fn lookup_misses(&self) -> usize {
        self.lookups.values().map(|c| c.misses).sum()
    }

    pub fn ambiguous_lookups(&self) -> usize {
        self.lookups.values().map(|c| c.ambiguous).sum()
    }

    /// Whether anything ambiguous was resolved during the run
    pub fn has_ambiguity(&self) -> bool {
        self.ambiguous_lookups() > 0 || self.ambiguous_cells > 0
    }

    /// True when no lookup missed or was ambiguous and every row was placed
    pub fn is_clean(&self) -> bool {
        self.lookup_misses() == 0 && !self.has_ambiguity() && self.unplaced_rows.is_empty()
    }

    /// Emit one warning per kind of condition observed
    pub fn log_warnings(&self) {
        for (level, counts) in &self.lookups {
            if counts.misses > 0 {
                warn!(
                    "{} of {} {} lookups found no characteristics row (values left empty)",
                    counts.misses,
                    counts.total(),
                    level
                );
            }
            if counts.ambiguous > 0 {
                warn!(
                    "{} {} lookups matched several characteristics rows (first row used)",
                    counts.ambiguous, level
                );
            }
        }

        if self.ambiguous_cells > 0 {
            warn!(
                "{} pivot cells received more than one value (last value kept)",
                self.ambiguous_cells
            );
        }

        if !self.unplaced_rows.is_empty() {
            let preview: Vec<String> = self
                .unplaced_rows
                .iter()
                .take(10)
                .map(|i| i.to_string())
                .collect();
            warn!(
                "{} rows have no pivot label and were left out of the pivot (rows {}{})",
                self.unplaced_rows.len(),
                preview.join(", "),
                if self.unplaced_rows.len() > 10 { ", ..." } else { "" }
            );
        }
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} lookup misses, {} ambiguous lookups, {} ambiguous cells, {} unplaced rows",
            self.lookup_misses(),
            self.ambiguous_lookups(),
            self.ambiguous_cells,
            self.unplaced_rows.len()
        )
    }
}
