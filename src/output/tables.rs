//! CSV writers for the enriched long-form table and the pivot table.
//!
//! "No data" is written as an empty field. Headers depend only on the
//! hierarchy (long form) or the pivot axes (wide form), never on the data.

use super::paths::{create_output_file, file_size};
use crate::enricher::{EnrichedRow, Hierarchy, LevelCharacteristics};
use crate::loader::{LevelSample, VictimSample};
use crate::normalizer::log2_key;
use crate::pivot::{PivotTable, RowAxis};
use crate::utils::config::*;
use crate::utils::error::OutputError;
use csv::Writer;
use log::info;
use std::io::Write;
use std::path::Path;

const L1_COLUMNS: [&str; 10] = [
    COL_L1_ASSOC,
    COL_L1_SIZE,
    COL_L1_MISS_RATE,
    COL_L1_READS,
    COL_L1_WRITES,
    COL_L1_READ_MISSES,
    COL_L1_WRITE_MISSES,
    "l1at",
    "l1area",
    "l1lookup",
];

const L2_COLUMNS: [&str; 10] = [
    COL_L2_ASSOC,
    COL_L2_SIZE,
    COL_L2_MISS_RATE,
    COL_L2_READS,
    COL_L2_WRITES,
    COL_L2_READ_MISSES,
    COL_L2_WRITE_MISSES,
    "l2at",
    "l2area",
    "l2lookup",
];

const VICTIM_COLUMNS: [&str; 7] = [
    COL_VC_SIZE,
    COL_VC_SWAP_REQUESTS,
    COL_VC_SWAP_REQUEST_RATE,
    COL_VC_SWAPS,
    "vcat",
    "vcarea",
    "vclookup",
];

fn float(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn characteristics_fields(chars: Option<&LevelCharacteristics>) -> [String; 3] {
    match chars {
        Some(c) => [float(c.access_time_ns), float(c.area), c.status.to_string()],
        None => Default::default(),
    }
}

fn level_fields(level: Option<&LevelSample>, chars: Option<&LevelCharacteristics>) -> Vec<String> {
    let mut fields = match level {
        Some(l) => vec![
            l.assoc_code.to_string(),
            l.size_bytes.to_string(),
            float(l.miss_rate),
            count(l.reads),
            count(l.writes),
            count(l.read_misses),
            count(l.write_misses),
        ],
        None => vec![String::new(); 7],
    };
    fields.extend(characteristics_fields(chars));
    fields
}

fn victim_fields(victim: Option<&VictimSample>, chars: Option<&LevelCharacteristics>) -> Vec<String> {
    let mut fields = match victim {
        Some(v) => vec![
            v.entries.to_string(),
            count(v.swap_requests),
            float(v.swap_request_rate),
            count(v.swaps),
        ],
        None => vec![String::new(); 4],
    };
    fields.extend(characteristics_fields(chars));
    fields
}

/// Header of the enriched long-form table for a hierarchy
pub fn enriched_header(hierarchy: Hierarchy) -> Vec<&'static str> {
    let mut header: Vec<&'static str> = L1_COLUMNS.to_vec();
    if hierarchy.has_l2() {
        header.extend(L2_COLUMNS);
    }
    if hierarchy.has_victim() {
        header.extend(VICTIM_COLUMNS);
    }
    header.extend(["log2l1s", COL_BLOCK_SIZE, "aat", "totalarea"]);
    header
}

fn enriched_record(row: &EnrichedRow, hierarchy: Hierarchy) -> Vec<String> {
    let sample = &row.sample;
    let mut record = level_fields(Some(&sample.l1), Some(&row.l1));
    if hierarchy.has_l2() {
        record.extend(level_fields(sample.l2.as_ref(), row.l2.as_ref()));
    }
    if hierarchy.has_victim() {
        record.extend(victim_fields(sample.victim.as_ref(), row.victim.as_ref()));
    }
    record.extend([
        float(log2_key(sample.l1.size_bytes)),
        count(sample.block_size),
        float(row.aat),
        float(row.total_area),
    ]);
    record
}

/// Write enriched rows as CSV to any writer, in input order
pub fn write_enriched<W: Write>(
    rows: &[EnrichedRow],
    hierarchy: Hierarchy,
    writer: W,
) -> Result<(), OutputError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(enriched_header(hierarchy))?;
    for row in rows {
        csv.write_record(enriched_record(row, hierarchy))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the enriched long-form table to a CSV file
///
/// **Public** - main entry point for long-form output
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or cannot be created
/// * `OutputError::Csv` - CSV write error
pub fn write_enriched_csv(
    rows: &[EnrichedRow],
    hierarchy: Hierarchy,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing enriched table to: {}", output_path.display());

    write_enriched(rows, hierarchy, create_output_file(output_path)?)?;

    info!(
        "Enriched table written successfully ({} rows, {} bytes)",
        rows.len(),
        file_size(output_path)
    );
    Ok(())
}

/// Write a pivot table as CSV to any writer
///
/// The first column holds the row key under the row axis name; the
/// remaining columns are the ranked categories.
pub fn write_pivot<W: Write>(table: &PivotTable, row_axis: RowAxis, writer: W) -> Result<(), OutputError> {
    let mut csv = Writer::from_writer(writer);

    let mut header = vec![row_axis.column_name().to_string()];
    header.extend(table.columns.iter().cloned());
    csv.write_record(&header)?;

    for (key, cells) in table.rows.iter().zip(&table.cells) {
        let mut record = vec![key.to_string()];
        record.extend(cells.iter().map(|c| float(c.value)));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write a pivot table to a CSV file
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or cannot be created
/// * `OutputError::Csv` - CSV write error
pub fn write_pivot_csv(
    table: &PivotTable,
    row_axis: RowAxis,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing pivot table to: {}", output_path.display());

    write_pivot(table, row_axis, create_output_file(output_path)?)?;

    info!(
        "Pivot table written successfully ({}x{}, {} bytes)",
        table.rows.len(),
        table.columns.len(),
        file_size(output_path)
    );
    Ok(())
}
