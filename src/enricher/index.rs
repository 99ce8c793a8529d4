//! Precomputed lookup indexes over the characteristics tables.
//!
//! Each index is built once per run and is read-only afterwards, turning
//! the per-row join into a hash lookup.

use crate::loader::{CharacteristicsEntry, VictimCharacteristicsEntry};
use crate::normalizer::normalize_assoc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Outcome of a characteristics lookup for one level of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupStatus {
    /// Exactly one matching row
    Hit,
    /// No matching row; access time and area are "no data"
    Miss,
    /// Several matching rows; the first in table order was used
    Ambiguous { candidates: usize },
    /// Level not part of this configuration; contributes zero time and area
    Absent,
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::Ambiguous { candidates } => write!(f, "ambiguous({})", candidates),
            Self::Absent => write!(f, "absent"),
        }
    }
}

/// Access time and area attached to one level of an enriched row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelCharacteristics {
    pub access_time_ns: Option<f64>,
    pub area: Option<f64>,
    #[serde(flatten)]
    pub status: LookupStatus,
}

impl LevelCharacteristics {
    pub fn miss() -> Self {
        Self {
            access_time_ns: None,
            area: None,
            status: LookupStatus::Miss,
        }
    }

    pub fn absent() -> Self {
        Self {
            access_time_ns: Some(0.0),
            area: Some(0.0),
            status: LookupStatus::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.status == LookupStatus::Absent
    }
}

/// Characteristics join key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacteristicsKey {
    pub size_bytes: u64,
    /// Normalized associativity (see `normalize_assoc`)
    pub assoc: i64,
    pub block_size: u64,
}

impl CharacteristicsKey {
    /// Key for a sample level; normalizes the raw associativity code
    pub fn for_sample(size_bytes: u64, raw_assoc: i64, block_size: u64) -> Self {
        Self {
            size_bytes,
            assoc: normalize_assoc(raw_assoc),
            block_size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    access_time_ns: f64,
    area: f64,
    candidates: usize,
}

/// Hash index keeping the first row per key and the number of rows sharing it
#[derive(Debug, Clone)]
pub struct LookupIndex<K> {
    slots: HashMap<K, Slot>,
    rows: usize,
}

impl<K: Hash + Eq> LookupIndex<K> {
    /// Build from (key, access time, area) triples in table order
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64, f64)>,
    {
        let mut slots: HashMap<K, Slot> = HashMap::new();
        let mut rows = 0;

        for (key, access_time_ns, area) in entries {
            rows += 1;
            slots
                .entry(key)
                .and_modify(|slot| slot.candidates += 1)
                .or_insert(Slot {
                    access_time_ns,
                    area,
                    candidates: 1,
                });
        }

        Self { slots, rows }
    }

    /// Look up a key
    pub fn lookup(&self, key: &K) -> LevelCharacteristics {
        match self.slots.get(key) {
            None => LevelCharacteristics::miss(),
            Some(slot) => LevelCharacteristics {
                access_time_ns: Some(slot.access_time_ns),
                area: Some(slot.area),
                status: if slot.candidates > 1 {
                    LookupStatus::Ambiguous {
                        candidates: slot.candidates,
                    }
                } else {
                    LookupStatus::Hit
                },
            },
        }
    }

    /// Number of keys shared by more than one table row
    pub fn duplicate_keys(&self) -> usize {
        self.slots.values().filter(|s| s.candidates > 1).count()
    }

    /// Number of table rows indexed
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Index over cache characteristics keyed by (size, assoc, block size)
pub type CharacteristicsIndex = LookupIndex<CharacteristicsKey>;

/// Index over victim cache characteristics keyed by entry count
pub type VictimIndex = LookupIndex<u64>;

/// Build the cache characteristics index
///
/// Table associativity codes are stored as written (fully associative
/// rows are expected to use -1).
pub fn build_characteristics_index(entries: &[CharacteristicsEntry]) -> CharacteristicsIndex {
    let index = LookupIndex::build(entries.iter().map(|e| {
        (
            CharacteristicsKey {
                size_bytes: e.size_bytes,
                assoc: e.assoc_code,
                block_size: e.block_size,
            },
            e.access_time_ns,
            e.area,
        )
    }));

    debug!(
        "Indexed {} characteristics rows ({} duplicated keys)",
        index.len(),
        index.duplicate_keys()
    );

    index
}

/// Build the victim cache characteristics index
pub fn build_victim_index(entries: &[VictimCharacteristicsEntry]) -> VictimIndex {
    let index = LookupIndex::build(entries.iter().map(|e| (e.entries, e.access_time_ns, e.area)));

    debug!(
        "Indexed {} victim characteristics rows ({} duplicated keys)",
        index.len(),
        index.duplicate_keys()
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(size: u64, assoc: i64, at: f64, area: f64) -> CharacteristicsEntry {
        CharacteristicsEntry {
            size_bytes: size,
            assoc_code: assoc,
            block_size: 32,
            access_time_ns: at,
            area,
        }
    }

    #[test]
    fn test_single_match() {
        let index = build_characteristics_index(&[entry(1024, 1, 5.0, 2.0)]);
        let found = index.lookup(&CharacteristicsKey::for_sample(1024, 1, 32));

        assert_eq!(found.status, LookupStatus::Hit);
        assert_eq!(found.access_time_ns, Some(5.0));
        assert_eq!(found.area, Some(2.0));
    }

    #[test]
    fn test_miss_is_no_data_not_zero() {
        let index = build_characteristics_index(&[entry(1024, 1, 5.0, 2.0)]);
        let found = index.lookup(&CharacteristicsKey::for_sample(2048, 1, 32));

        assert_eq!(found.status, LookupStatus::Miss);
        assert_eq!(found.access_time_ns, None);
        assert_eq!(found.area, None);
    }

    #[test]
    fn test_ambiguous_takes_first_row() {
        let index = build_characteristics_index(&[
            entry(1024, 1, 5.0, 2.0),
            entry(1024, 2, 6.0, 3.0),
            entry(1024, 1, 9.0, 9.0),
        ]);
        let found = index.lookup(&CharacteristicsKey::for_sample(1024, 1, 32));

        assert_eq!(found.status, LookupStatus::Ambiguous { candidates: 2 });
        assert_eq!(found.access_time_ns, Some(5.0));
        assert_eq!(index.duplicate_keys(), 1);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_fully_assoc_sample_uses_sentinel_key() {
        let index = build_characteristics_index(&[entry(4096, -1, 7.5, 4.0)]);
        let found = index.lookup(&CharacteristicsKey::for_sample(4096, 128, 32));

        assert_eq!(found.status, LookupStatus::Hit);
        assert_eq!(found.access_time_ns, Some(7.5));
    }

    #[test]
    fn test_block_size_is_part_of_the_key() {
        let index = build_characteristics_index(&[entry(1024, 1, 5.0, 2.0)]);
        let found = index.lookup(&CharacteristicsKey::for_sample(1024, 1, 64));
        assert_eq!(found.status, LookupStatus::Miss);
    }

    #[test]
    fn test_victim_index() {
        let index = build_victim_index(&[VictimCharacteristicsEntry {
            entries: 8,
            access_time_ns: 0.3,
            area: 0.01,
        }]);

        assert_eq!(index.lookup(&8).access_time_ns, Some(0.3));
        assert_eq!(index.lookup(&4).status, LookupStatus::Miss);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LookupStatus::Hit.to_string(), "hit");
        assert_eq!(LookupStatus::Ambiguous { candidates: 3 }.to_string(), "ambiguous(3)");
        assert_eq!(LookupStatus::Absent.to_string(), "absent");
    }
}
