//! Derived performance metrics.
//!
//! Pure functions over already-enriched values:
//! - Average access time for one, two and three-structure hierarchies
//! - Aggregate area

pub mod aat;
pub mod formula;

pub use aat::{single_level_aat, three_level_with_victim_aat, two_level_aat};
pub use formula::{total_area, AatInputs, Formula, NextLevel, VictimTerm};
