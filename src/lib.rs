//! cache-dse
//!
//! Design-space exploration metrics for cache hierarchies. Simulator
//! samples are joined against static timing and area tables, average
//! access time and total area are derived, and the results are pivoted
//! into one table per figure.
//!
//! This crate provides the core implementation for the `cache-dse` CLI.
//!
//! ## Getting Started
//!
//! ```bash
//! cache-dse presets --show
//! cache-dse run --samples l1.csv --characteristics cacti.csv \
//!     --preset aat-vs-l1 --pivot fig2.csv --summary
//! ```

pub mod commands;
pub mod enricher;
pub mod loader;
pub mod metrics;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod pivot;
pub mod utils;
