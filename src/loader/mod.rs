//! Loading of simulator samples and static characteristics tables.
//!
//! This module handles:
//! - Reading sample CSVs with a variant-dependent column set
//! - Reading cache and victim cache characteristics tables
//! - Failing fast on missing required columns

mod columns;
pub mod characteristics;
pub mod samples;
pub mod schema;

// Re-export main types
pub use characteristics::{
    load_characteristics, load_victim_characteristics, read_characteristics,
    read_victim_characteristics,
};
pub use samples::{load_samples, read_samples};
pub use schema::{
    CharacteristicsEntry, LevelSample, SampleLayout, SampleRow, VictimCharacteristicsEntry,
    VictimSample,
};
