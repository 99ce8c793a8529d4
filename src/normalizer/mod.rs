//! Mapping of raw simulator codes to lookup keys and display labels.
//!
//! Lookup keys feed the characteristics join; labels feed pivot axes.
//! The two are kept apart so a label is never used as a join key.

pub mod assoc;
pub mod labels;

pub use assoc::{assoc_rank, label_assoc, normalize_assoc};
pub use labels::{label_size, label_victim_config, log2_key};
