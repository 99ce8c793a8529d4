//! Output writers for run results.
//!
//! This module handles writing data to disk in various formats:
//! - Enriched long-form CSV
//! - Pivot wide-form CSV
//! - JSON run reports
//! - Terminal summaries

pub mod json;
pub mod paths;
pub mod summary;
pub mod tables;

// Re-export main functions
pub use json::{read_report, write_report, PivotReport, RunReport};
pub use summary::render_terminal_summary;
pub use tables::{enriched_header, write_enriched, write_enriched_csv, write_pivot, write_pivot_csv};
