//! Reader for simulator sample files.
//!
//! The simulator writes one CSV row per configuration, with headers such
//! as ` l1a, l1s, l1missrate`. Headers and fields are trimmed before use.

use super::columns::{Cells, Columns};
use super::schema::{LevelSample, SampleLayout, SampleRow, VictimSample};
use crate::utils::config::*;
use crate::utils::error::LoadError;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column positions for one cache level
struct LevelColumns {
    assoc: usize,
    size: usize,
    miss_rate: usize,
    reads: Option<usize>,
    writes: Option<usize>,
    read_misses: Option<usize>,
    write_misses: Option<usize>,
}

struct LevelNames {
    assoc: &'static str,
    size: &'static str,
    miss_rate: &'static str,
    reads: &'static str,
    writes: &'static str,
    read_misses: &'static str,
    write_misses: &'static str,
}

const L1_NAMES: LevelNames = LevelNames {
    assoc: COL_L1_ASSOC,
    size: COL_L1_SIZE,
    miss_rate: COL_L1_MISS_RATE,
    reads: COL_L1_READS,
    writes: COL_L1_WRITES,
    read_misses: COL_L1_READ_MISSES,
    write_misses: COL_L1_WRITE_MISSES,
};

const L2_NAMES: LevelNames = LevelNames {
    assoc: COL_L2_ASSOC,
    size: COL_L2_SIZE,
    miss_rate: COL_L2_MISS_RATE,
    reads: COL_L2_READS,
    writes: COL_L2_WRITES,
    read_misses: COL_L2_READ_MISSES,
    write_misses: COL_L2_WRITE_MISSES,
};

impl LevelColumns {
    fn resolve(columns: &Columns, names: &LevelNames) -> Result<Self, LoadError> {
        Ok(Self {
            assoc: columns.require(names.assoc)?,
            size: columns.require(names.size)?,
            miss_rate: columns.require(names.miss_rate)?,
            reads: columns.optional(names.reads),
            writes: columns.optional(names.writes),
            read_misses: columns.optional(names.read_misses),
            write_misses: columns.optional(names.write_misses),
        })
    }

    fn read(&self, cells: &Cells, names: &LevelNames) -> Result<LevelSample, LoadError> {
        Ok(LevelSample {
            size_bytes: cells.required_count(self.size, names.size)?,
            assoc_code: cells.required_int(self.assoc, names.assoc)?,
            miss_rate: cells.float(Some(self.miss_rate), names.miss_rate)?,
            reads: cells.count(self.reads, names.reads)?,
            writes: cells.count(self.writes, names.writes)?,
            read_misses: cells.count(self.read_misses, names.read_misses)?,
            write_misses: cells.count(self.write_misses, names.write_misses)?,
        })
    }
}

struct VictimColumns {
    entries: usize,
    swap_request_rate: usize,
    swap_requests: Option<usize>,
    swaps: Option<usize>,
}

impl VictimColumns {
    fn resolve(columns: &Columns) -> Result<Self, LoadError> {
        Ok(Self {
            entries: columns.require(COL_VC_SIZE)?,
            swap_request_rate: columns.require(COL_VC_SWAP_REQUEST_RATE)?,
            swap_requests: columns.optional(COL_VC_SWAP_REQUESTS),
            swaps: columns.optional(COL_VC_SWAPS),
        })
    }

    fn read(&self, cells: &Cells) -> Result<VictimSample, LoadError> {
        Ok(VictimSample {
            entries: cells.required_count(self.entries, COL_VC_SIZE)?,
            swap_requests: cells.count(self.swap_requests, COL_VC_SWAP_REQUESTS)?,
            swap_request_rate: cells.float(Some(self.swap_request_rate), COL_VC_SWAP_REQUEST_RATE)?,
            swaps: cells.count(self.swaps, COL_VC_SWAPS)?,
        })
    }
}

/// Resolved column layout for a sample file
struct SampleColumns {
    l1: LevelColumns,
    l2: Option<LevelColumns>,
    victim: Option<VictimColumns>,
    block_size: Option<usize>,
}

impl SampleColumns {
    fn resolve(headers: &StringRecord, layout: SampleLayout) -> Result<Self, LoadError> {
        let columns = Columns::new("samples", headers);

        let l1 = LevelColumns::resolve(&columns, &L1_NAMES)?;
        let l2 = if layout.with_l2 {
            Some(LevelColumns::resolve(&columns, &L2_NAMES)?)
        } else {
            None
        };
        let victim = if layout.with_victim {
            Some(VictimColumns::resolve(&columns)?)
        } else {
            None
        };
        let block_size = if layout.require_block_size {
            Some(columns.require(COL_BLOCK_SIZE)?)
        } else {
            columns.optional(COL_BLOCK_SIZE)
        };

        Ok(Self {
            l1,
            l2,
            victim,
            block_size,
        })
    }

    fn read(&self, cells: &Cells) -> Result<SampleRow, LoadError> {
        let mut row = SampleRow::l1_only(self.l1.read(cells, &L1_NAMES)?);
        if let Some(cols) = &self.l2 {
            row = row.with_l2(cols.read(cells, &L2_NAMES)?);
        }
        if let Some(cols) = &self.victim {
            row = row.with_victim(cols.read(cells)?);
        }
        if let Some(block_size) = cells.count(self.block_size, COL_BLOCK_SIZE)? {
            row = row.with_block_size(block_size);
        }
        Ok(row)
    }
}

/// Read sample rows from any CSV source
///
/// **Public** - used by `load_samples` and by tests with in-memory input
///
/// # Errors
/// * `LoadError::MissingColumn` - a column required by `layout` is absent
/// * `LoadError::InvalidValue` - a cell does not parse as a number
/// * `LoadError::Csv` - malformed CSV
pub fn read_samples<R: Read>(reader: R, layout: SampleLayout) -> Result<Vec<SampleRow>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = SampleColumns::resolve(&headers, layout)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let cells = Cells {
            record: &record,
            line: idx + 2,
        };
        rows.push(columns.read(&cells)?);
    }

    debug!("Read {} sample rows", rows.len());

    Ok(rows)
}

/// Load sample rows from a CSV file
///
/// **Public** - main entry point for sample loading
pub fn load_samples(path: impl AsRef<Path>, layout: SampleLayout) -> Result<Vec<SampleRow>, LoadError> {
    let path = path.as_ref();
    debug!("Loading samples from: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    read_samples(file, layout)
}
