//! JSON run report writer.
//!
//! The report records what was run and what came out of it: the
//! configuration, diagnostics counts and the pivot table, with `null`
//! for cells that hold no data.

use super::paths::{create_output_file, file_size};
use crate::pipeline::{Diagnostics, PipelineConfig, RunResult};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Pivot table as stored in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotReport {
    /// Name of the row axis column (e.g. `log2l1s`)
    pub row_axis: String,
    /// Name of the value field (e.g. `aat`)
    pub value: String,
    pub rows: Vec<f64>,
    pub columns: Vec<String>,
    /// `values[row][column]`; `null` is "no data"
    pub values: Vec<Vec<Option<f64>>>,
}

/// Complete run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version for the report format
    pub schema_version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub config: PipelineConfig,

    /// Number of sample rows processed
    pub row_count: usize,

    pub diagnostics: Diagnostics,

    pub pivot: PivotReport,
}

impl RunReport {
    /// Build a report from a finished run
    pub fn from_run(result: &RunResult) -> Self {
        let pivot = &result.pivot;
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            config: result.config.clone(),
            row_count: result.rows.len(),
            diagnostics: result.diagnostics.clone(),
            pivot: PivotReport {
                row_axis: result.config.pivot.row_axis.column_name().to_string(),
                value: result.config.pivot.value.to_string(),
                rows: pivot.rows.clone(),
                columns: pivot.columns.clone(),
                values: pivot
                    .cells
                    .iter()
                    .map(|row| row.iter().map(|c| c.value).collect())
                    .collect(),
            },
        }
    }
}

/// Write a run report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &RunReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing run report to: {}", output_path.display());

    let writer = create_output_file(output_path)?;
    serde_json::to_writer_pretty(writer, report)?;

    info!(
        "Run report written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Read a run report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<RunReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading run report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let report: RunReport = serde_json::from_reader(file)?;

    debug!(
        "Run report loaded: version {}, {} rows",
        report.schema_version, report.row_count
    );

    Ok(report)
}
