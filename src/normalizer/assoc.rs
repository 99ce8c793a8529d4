//! Associativity code handling.
//!
//! The simulator reports associativity as a way count; fully associative
//! caches report their block count instead. Two separate mappings exist:
//! a lookup key (`normalize_assoc`) applied before any characteristics join,
//! and a display label (`label_assoc`) applied afterwards for pivot axes.

use crate::utils::config::{DIRECT_ASSOC_CODES, FULLY_ASSOC_SENTINEL};

/// Map a raw associativity code to its characteristics lookup key
///
/// Identity for 1, 2, 4 and 8; every other code becomes the fully
/// associative sentinel (-1). Idempotent.
pub fn normalize_assoc(code: i64) -> i64 {
    if DIRECT_ASSOC_CODES.contains(&code) {
        code
    } else {
        FULLY_ASSOC_SENTINEL
    }
}

/// Human-readable label for an associativity code
///
/// Accepts raw codes as well as normalized keys; anything outside
/// {1, 2, 4, 8} (the sentinel included) is "Fully Assoc.".
pub fn label_assoc(code: i64) -> &'static str {
    match code {
        1 => "Direct Mapped",
        2 => "2-way Set Assoc.",
        4 => "4-way Set Assoc.",
        8 => "8-way Set Assoc.",
        _ => "Fully Assoc.",
    }
}

/// Presentation order of an associativity category
///
/// Direct mapped first, fully associative last.
pub fn assoc_rank(code: i64) -> i64 {
    match normalize_assoc(code) {
        FULLY_ASSOC_SENTINEL => i64::MAX,
        ways => ways,
    }
}
