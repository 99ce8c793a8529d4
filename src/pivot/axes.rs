//! Axis and value selectors over enriched rows.

use super::table::ColumnKey;
use crate::enricher::EnrichedRow;
use crate::normalizer::{assoc_rank, label_assoc, label_size, label_victim_config, log2_key};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric row axis of a pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowAxis {
    Log2L1Size,
    Log2L2Size,
    Log2BlockSize,
}

impl RowAxis {
    /// Header used for the row axis column in tabular output
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Log2L1Size => "log2l1s",
            Self::Log2L2Size => "log2l2s",
            Self::Log2BlockSize => "log2bs",
        }
    }

    pub fn requires_l2(&self) -> bool {
        matches!(self, Self::Log2L2Size)
    }

    pub fn requires_block_size(&self) -> bool {
        matches!(self, Self::Log2BlockSize)
    }

    /// Row key of an enriched row; `None` if the row lacks the field or the level is absent
    pub fn key(&self, row: &EnrichedRow) -> Option<f64> {
        match self {
            Self::Log2L1Size => log2_key(row.sample.l1.size_bytes),
            Self::Log2L2Size => row.sample.l2.as_ref().and_then(|l2| log2_key(l2.size_bytes)),
            Self::Log2BlockSize => row.sample.block_size.and_then(log2_key),
        }
    }
}

/// Categorical column axis of a pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnAxis {
    L1Assoc,
    L1Size,
    L2Size,
    VictimConfig,
}

impl ColumnAxis {
    pub fn requires_l2(&self) -> bool {
        matches!(self, Self::L2Size)
    }

    pub fn requires_victim(&self) -> bool {
        matches!(self, Self::VictimConfig)
    }

    /// Column category of an enriched row; `None` when the row has no label
    pub fn key(&self, row: &EnrichedRow) -> Option<ColumnKey> {
        let l1 = &row.sample.l1;
        match self {
            Self::L1Assoc => Some(ColumnKey::new(assoc_rank(l1.assoc_code), label_assoc(l1.assoc_code))),
            Self::L1Size => Some(size_key(l1.size_bytes)),
            Self::L2Size => row.sample.l2.as_ref().map(|l2| size_key(l2.size_bytes)),
            Self::VictimConfig => {
                let victim = row.sample.victim.as_ref()?;
                let label = label_victim_config(l1.assoc_code, victim.entries)?;
                // Direct-mapped configurations first, by victim size; the
                // set-associative labels ignore the entry count
                let entries = if l1.assoc_code == 1 { victim.entries as i64 } else { 0 };
                let rank = assoc_rank(l1.assoc_code) * 1_000 + entries;
                Some(ColumnKey::new(rank, label))
            }
        }
    }
}

impl fmt::Display for ColumnAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L1Assoc => "l1-assoc",
            Self::L1Size => "l1-size",
            Self::L2Size => "l2-size",
            Self::VictimConfig => "victim-config",
        };
        write!(f, "{}", name)
    }
}

fn size_key(bytes: u64) -> ColumnKey {
    ColumnKey::new(i64::try_from(bytes).unwrap_or(i64::MAX), label_size(bytes))
}

/// Field placed in pivot cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueField {
    L1MissRate,
    L2MissRate,
    L1AccessTime,
    L2AccessTime,
    VictimAccessTime,
    Aat,
    TotalArea,
}

impl ValueField {
    pub fn requires_l2(&self) -> bool {
        matches!(self, Self::L2MissRate | Self::L2AccessTime)
    }

    pub fn requires_victim(&self) -> bool {
        matches!(self, Self::VictimAccessTime)
    }

    /// Selected value of an enriched row; `None` is "no data"
    pub fn value(&self, row: &EnrichedRow) -> Option<f64> {
        match self {
            Self::L1MissRate => row.sample.l1.miss_rate,
            Self::L2MissRate => row.sample.l2.as_ref().and_then(|l| l.miss_rate),
            Self::L1AccessTime => row.l1.access_time_ns,
            Self::L2AccessTime => row.l2.as_ref().and_then(|l| l.access_time_ns),
            Self::VictimAccessTime => row.victim.as_ref().and_then(|v| v.access_time_ns),
            Self::Aat => row.aat,
            Self::TotalArea => row.total_area,
        }
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L1MissRate => "l1-miss-rate",
            Self::L2MissRate => "l2-miss-rate",
            Self::L1AccessTime => "l1-access-time",
            Self::L2AccessTime => "l2-access-time",
            Self::VictimAccessTime => "victim-access-time",
            Self::Aat => "aat",
            Self::TotalArea => "total-area",
        };
        write!(f, "{}", name)
    }
}
