//! Header lookup and typed cell parsing shared by every table reader.

use crate::utils::error::LoadError;
use csv::StringRecord;
use std::collections::HashMap;

/// Column name -> position map for one CSV table
#[derive(Debug, Clone)]
pub(crate) struct Columns {
    table: String,
    positions: HashMap<String, usize>,
    names: Vec<String>,
}

impl Columns {
    /// Build from the (already trimmed) header record
    pub(crate) fn new(table: &str, headers: &StringRecord) -> Self {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let mut positions = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            // Keep the first occurrence of a duplicated header
            positions.entry(name.clone()).or_insert(idx);
        }

        Self {
            table: table.to_string(),
            positions,
            names,
        }
    }

    /// Position of a column that must be present
    pub(crate) fn require(&self, column: &str) -> Result<usize, LoadError> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| LoadError::MissingColumn {
                table: self.table.clone(),
                column: column.to_string(),
                available: self.names.join(", "),
            })
    }

    /// Position of a column that may be absent
    pub(crate) fn optional(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }
}

/// One data record together with its line number for error reporting
pub(crate) struct Cells<'a> {
    pub(crate) record: &'a StringRecord,
    pub(crate) line: usize,
}

impl<'a> Cells<'a> {
    fn raw(&self, idx: usize) -> &'a str {
        self.record.get(idx).map(str::trim).unwrap_or("")
    }

    fn invalid(&self, column: &str, value: &str) -> LoadError {
        LoadError::InvalidValue {
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Float cell; empty cells (and NaN) are "no data"
    pub(crate) fn float(&self, idx: Option<usize>, column: &str) -> Result<Option<f64>, LoadError> {
        let Some(idx) = idx else { return Ok(None) };
        let raw = self.raw(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        let value: f64 = raw.parse().map_err(|_| self.invalid(column, raw))?;
        Ok(if value.is_nan() { None } else { Some(value) })
    }

    /// Float cell that must hold a value
    pub(crate) fn required_float(&self, idx: usize, column: &str) -> Result<f64, LoadError> {
        self.float(Some(idx), column)?
            .ok_or_else(|| self.invalid(column, self.raw(idx)))
    }

    /// Signed integer cell; accepts integral floats such as "32.0"
    pub(crate) fn int(&self, idx: Option<usize>, column: &str) -> Result<Option<i64>, LoadError> {
        let Some(idx) = idx else { return Ok(None) };
        let raw = self.raw(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Ok(Some(value));
        }
        match raw.parse::<f64>() {
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            Ok(value)
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
            {
                Ok(Some(value as i64))
            }
            _ => Err(self.invalid(column, raw)),
        }
    }

    /// Signed integer cell that must hold a value
    pub(crate) fn required_int(&self, idx: usize, column: &str) -> Result<i64, LoadError> {
        self.int(Some(idx), column)?
            .ok_or_else(|| self.invalid(column, self.raw(idx)))
    }

    /// Unsigned integer cell
    pub(crate) fn count(&self, idx: Option<usize>, column: &str) -> Result<Option<u64>, LoadError> {
        match self.int(idx, column)? {
            None => Ok(None),
            Some(value) => u64::try_from(value)
                .map(Some)
                .map_err(|_| self.invalid(column, &value.to_string())),
        }
    }

    /// Unsigned integer cell that must hold a value
    pub(crate) fn required_count(&self, idx: usize, column: &str) -> Result<u64, LoadError> {
        self.count(Some(idx), column)?
            .ok_or_else(|| self.invalid(column, self.raw(idx)))
    }
}
