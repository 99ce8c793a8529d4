//! Closed-form average access time formulas.
//!
//! All times share one unit (ns in the shipped tables). The memory penalty
//! is a run-wide parameter, never a literal inside a formula.

/// AAT of an L1 backed directly by main memory
pub fn single_level_aat(hit_time: f64, miss_rate: f64, mem_penalty: f64) -> f64 {
    hit_time + miss_rate * mem_penalty
}

/// AAT of an L1 backed by an L2, backed by main memory
pub fn two_level_aat(
    l1_hit: f64,
    l1_miss_rate: f64,
    l2_hit: f64,
    l2_miss_rate: f64,
    mem_penalty: f64,
) -> f64 {
    l1_hit + l1_miss_rate * (l2_hit + l2_miss_rate * mem_penalty)
}

/// AAT of an L1 with a victim cache, backed by an L2, backed by main memory
///
/// Every swap request pays the victim cache access time on top of the
/// L1 hit time.
pub fn three_level_with_victim_aat(
    l1_hit: f64,
    l1_miss_rate: f64,
    l2_hit: f64,
    l2_miss_rate: f64,
    mem_penalty: f64,
    victim_hit: f64,
    swap_request_rate: f64,
) -> f64 {
    l1_hit + swap_request_rate * victim_hit + l1_miss_rate * (l2_hit + l2_miss_rate * mem_penalty)
}
