//! Configuration constants shared across a run.

/// Current run report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Main-memory access penalty in ns, shared by every AAT formula
pub const DEFAULT_MEM_PENALTY_NS: f64 = 20.1;

/// Block size used for characteristics lookups when the run does not override it
pub const DEFAULT_BLOCK_SIZE: u64 = 32;

/// Associativity codes that have their own characteristics rows
pub const DIRECT_ASSOC_CODES: &[i64] = &[1, 2, 4, 8];

/// Lookup key used for every other associativity (fully associative)
pub const FULLY_ASSOC_SENTINEL: i64 = -1;

// Sample file columns (headers are trimmed before matching)
pub const COL_L1_ASSOC: &str = "l1a";
pub const COL_L1_SIZE: &str = "l1s";
pub const COL_L1_MISS_RATE: &str = "l1missrate";
pub const COL_L1_READS: &str = "l1read";
pub const COL_L1_WRITES: &str = "l1write";
pub const COL_L1_READ_MISSES: &str = "l1readmiss";
pub const COL_L1_WRITE_MISSES: &str = "l1writemiss";

pub const COL_L2_ASSOC: &str = "l2a";
pub const COL_L2_SIZE: &str = "l2s";
pub const COL_L2_MISS_RATE: &str = "l2missrate";
pub const COL_L2_READS: &str = "l2read";
pub const COL_L2_WRITES: &str = "l2write";
pub const COL_L2_READ_MISSES: &str = "l2readmiss";
pub const COL_L2_WRITE_MISSES: &str = "l2writemiss";

pub const COL_VC_SIZE: &str = "vcs";
pub const COL_VC_SWAP_REQUESTS: &str = "swapreqs";
pub const COL_VC_SWAP_REQUEST_RATE: &str = "swapreqrate";
pub const COL_VC_SWAPS: &str = "swaps";

pub const COL_BLOCK_SIZE: &str = "bs";

// Characteristics table columns
pub const COL_CHAR_SIZE: &str = "size";
pub const COL_CHAR_ASSOC: &str = "assoc";
pub const COL_CHAR_BLOCK_SIZE: &str = "blocksize";
pub const COL_CHAR_ACCESS_TIME: &str = "at";
pub const COL_CHAR_AREA: &str = "area";
