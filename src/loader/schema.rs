//! In-memory records for simulator samples and characteristics tables.

use serde::{Deserialize, Serialize};

/// Statistics for one cache level of a simulated configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSample {
    /// Capacity in bytes (0 means the level is not part of the hierarchy)
    pub size_bytes: u64,

    /// Raw associativity code as reported by the simulator
    pub assoc_code: i64,

    /// Fraction of accesses that missed
    pub miss_rate: Option<f64>,

    pub reads: Option<u64>,
    pub writes: Option<u64>,
    pub read_misses: Option<u64>,
    pub write_misses: Option<u64>,
}

impl LevelSample {
    /// Create a level sample with only the fields the formulas need
    pub fn new(size_bytes: u64, assoc_code: i64, miss_rate: f64) -> Self {
        Self {
            size_bytes,
            assoc_code,
            miss_rate: Some(miss_rate),
            reads: None,
            writes: None,
            read_misses: None,
            write_misses: None,
        }
    }
}

/// Victim cache statistics of a simulated configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimSample {
    /// Number of victim cache entries (0 means no victim cache)
    pub entries: u64,

    pub swap_requests: Option<u64>,

    /// Fraction of L1 accesses that triggered a swap request
    pub swap_request_rate: Option<f64>,

    pub swaps: Option<u64>,
}

impl VictimSample {
    pub fn new(entries: u64, swap_request_rate: f64) -> Self {
        Self {
            entries,
            swap_requests: None,
            swap_request_rate: Some(swap_request_rate),
            swaps: None,
        }
    }
}

/// One simulated configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    pub l1: LevelSample,
    pub l2: Option<LevelSample>,
    pub victim: Option<VictimSample>,
    pub block_size: Option<u64>,
}

impl SampleRow {
    /// L1-only sample
    pub fn l1_only(l1: LevelSample) -> Self {
        Self {
            l1,
            l2: None,
            victim: None,
            block_size: None,
        }
    }

    pub fn with_l2(mut self, l2: LevelSample) -> Self {
        self.l2 = Some(l2);
        self
    }

    pub fn with_victim(mut self, victim: VictimSample) -> Self {
        self.victim = Some(victim);
        self
    }

    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = Some(block_size);
        self
    }
}

/// Static timing and area for one (size, associativity, block size) design point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicsEntry {
    pub size_bytes: u64,
    pub assoc_code: i64,
    pub block_size: u64,
    pub access_time_ns: f64,
    pub area: f64,
}

/// Static timing and area for a victim cache with a given entry count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimCharacteristicsEntry {
    pub entries: u64,
    pub access_time_ns: f64,
    pub area: f64,
}

/// Which sample columns a run needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleLayout {
    pub with_l2: bool,
    pub with_victim: bool,
    pub require_block_size: bool,
}
