//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Only conditions that abort a run live here. Lookup misses, ambiguous
//! lookups and pivot collisions are recorded as statuses on the affected
//! row or cell (see `pipeline::Diagnostics`).

use thiserror::Error;

/// Errors that can occur while loading samples or characteristics tables
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{column}' in {table} (available: {available})")]
    MissingColumn {
        table: String,
        column: String,
        available: String,
    },

    #[error("Invalid value '{value}' in column '{column}' at line {line}")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },
}

/// Errors that can occur while loading or validating a pipeline configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Errors that can abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "Ambiguity policy violated: {ambiguous_lookups} ambiguous lookup(s), {ambiguous_cells} ambiguous pivot cell(s)"
    )]
    PolicyViolation {
        ambiguous_lookups: usize,
        ambiguous_cells: usize,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
