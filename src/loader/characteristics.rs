//! Readers for the static component characteristics tables.

use super::columns::{Cells, Columns};
use super::schema::{CharacteristicsEntry, VictimCharacteristicsEntry};
use crate::utils::config::*;
use crate::utils::error::LoadError;
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read cache characteristics (`size, assoc, blocksize, at, area`)
///
/// Table order is preserved; it decides which row wins an ambiguous lookup.
pub fn read_characteristics<R: Read>(reader: R) -> Result<Vec<CharacteristicsEntry>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let columns = Columns::new("characteristics", reader.headers()?);
    let size = columns.require(COL_CHAR_SIZE)?;
    let assoc = columns.require(COL_CHAR_ASSOC)?;
    let block_size = columns.require(COL_CHAR_BLOCK_SIZE)?;
    let access_time = columns.require(COL_CHAR_ACCESS_TIME)?;
    let area = columns.require(COL_CHAR_AREA)?;

    let mut entries = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let cells = Cells {
            record: &record,
            line: idx + 2,
        };

        entries.push(CharacteristicsEntry {
            size_bytes: cells.required_count(size, COL_CHAR_SIZE)?,
            assoc_code: cells.required_int(assoc, COL_CHAR_ASSOC)?,
            block_size: cells.required_count(block_size, COL_CHAR_BLOCK_SIZE)?,
            access_time_ns: cells.required_float(access_time, COL_CHAR_ACCESS_TIME)?,
            area: cells.required_float(area, COL_CHAR_AREA)?,
        });
    }

    debug!("Read {} characteristics entries", entries.len());

    Ok(entries)
}

/// Read victim cache characteristics (`vcs, at, area`)
pub fn read_victim_characteristics<R: Read>(
    reader: R,
) -> Result<Vec<VictimCharacteristicsEntry>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let columns = Columns::new("victim characteristics", reader.headers()?);
    let entries_col = columns.require(COL_VC_SIZE)?;
    let access_time = columns.require(COL_CHAR_ACCESS_TIME)?;
    let area = columns.require(COL_CHAR_AREA)?;

    let mut entries = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let cells = Cells {
            record: &record,
            line: idx + 2,
        };

        entries.push(VictimCharacteristicsEntry {
            entries: cells.required_count(entries_col, COL_VC_SIZE)?,
            access_time_ns: cells.required_float(access_time, COL_CHAR_ACCESS_TIME)?,
            area: cells.required_float(area, COL_CHAR_AREA)?,
        });
    }

    debug!("Read {} victim characteristics entries", entries.len());

    Ok(entries)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load cache characteristics from a CSV file
pub fn load_characteristics(path: impl AsRef<Path>) -> Result<Vec<CharacteristicsEntry>, LoadError> {
    let path = path.as_ref();
    debug!("Loading characteristics from: {}", path.display());
    read_characteristics(open(path)?)
}

/// Load victim cache characteristics from a CSV file
pub fn load_victim_characteristics(
    path: impl AsRef<Path>,
) -> Result<Vec<VictimCharacteristicsEntry>, LoadError> {
    let path = path.as_ref();
    debug!("Loading victim characteristics from: {}", path.display());
    read_victim_characteristics(open(path)?)
}
