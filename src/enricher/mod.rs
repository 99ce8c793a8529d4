//! Attachment of static characteristics to sample rows.
//!
//! This module transforms loaded samples into enriched rows:
//! - Hash indexes over the characteristics tables
//! - Per-level lookups with explicit hit / miss / ambiguous / absent status
//! - Derived AAT and total area

pub mod index;
pub mod joiner;

// Re-export main types and functions
pub use index::{
    build_characteristics_index, build_victim_index, CharacteristicsIndex, CharacteristicsKey,
    LevelCharacteristics, LookupIndex, LookupStatus, VictimIndex,
};
pub use joiner::{EnrichOptions, EnrichedRow, Enricher, Hierarchy};
