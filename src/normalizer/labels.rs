//! Display labels for sizes and victim cache configurations.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Known cache sizes and their labels
const SIZE_LABELS: &[(u64, &str)] = &[
    (1024, "1KiB"),
    (2048, "2KiB"),
    (4096, "4KiB"),
    (8192, "8KiB"),
    (16384, "16KiB"),
    (32768, "32KiB"),
    (65536, "64KiB"),
    (131072, "128KiB"),
    (262144, "256KiB"),
    (524288, "512KiB"),
    (1048576, "1MiB"),
];

/// Label a cache size in bytes
///
/// Sizes in the known table use their fixed label. Any other size is
/// formatted in the largest binary unit that divides it exactly, so
/// 3 MiB becomes "3MiB", 3072 becomes "3KiB" and 100 becomes "100B".
pub fn label_size(bytes: u64) -> String {
    if let Some((_, label)) = SIZE_LABELS.iter().find(|(size, _)| *size == bytes) {
        return (*label).to_string();
    }

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MiB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KiB", bytes / KIB)
    } else {
        format!("{}B", bytes)
    }
}

/// Label an L1 associativity / victim cache pairing
///
/// Only the pairings studied in the victim cache sweep have labels:
/// a direct-mapped L1 with 0, 2, 4, 8 or 16 victim entries, and 2-way or
/// 4-way L1s (which never carry a victim cache). Returns `None` for every
/// other combination; callers must report those rows.
pub fn label_victim_config(assoc_code: i64, victim_entries: u64) -> Option<&'static str> {
    match (assoc_code, victim_entries) {
        (1, 0) => Some("Direct Mapped L1 w/ No VC"),
        (1, 2) => Some("Direct Mapped L1 w/ 2-entry VC"),
        (1, 4) => Some("Direct Mapped L1 w/ 4-entry VC"),
        (1, 8) => Some("Direct Mapped L1 w/ 8-entry VC"),
        (1, 16) => Some("Direct Mapped L1 w/ 16-entry VC"),
        (2, _) => Some("2-way Set Assoc. L1 w/ No VC"),
        (4, _) => Some("4-way Set Assoc. L1 w/ No VC"),
        _ => None,
    }
}

/// Row-axis key for a power-of-two quantity; `None` for zero (an absent level)
pub fn log2_key(value: u64) -> Option<f64> {
    (value > 0).then(|| (value as f64).log2())
}
