use crate::pipeline::{load_config, preset, PipelineConfig};
use crate::utils::error::ConfigError;
use std::path::PathBuf;

/// Where a run's configuration comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Built-in preset by name
    Preset(String),
    /// TOML configuration file
    File(PathBuf),
}

impl ConfigSource {
    /// Load and validate the configuration
    pub fn load(&self) -> Result<PipelineConfig, ConfigError> {
        match self {
            Self::Preset(name) => preset(name),
            Self::File(path) => load_config(path),
        }
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::Preset("aat-vs-l1".to_string())
    }
}

/// Arguments for the run command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Simulator sample CSV
    pub samples: PathBuf,

    /// Cache characteristics CSV (optional when no timing or area is used)
    pub characteristics: Option<PathBuf>,

    /// Victim cache characteristics CSV
    pub victim: Option<PathBuf>,

    /// Preset or configuration file
    pub source: ConfigSource,

    /// Override for the main-memory penalty
    pub mem_penalty: Option<f64>,

    /// Override for the lookup block size
    pub block_size: Option<u64>,

    /// Fail the run on any ambiguous lookup or pivot cell
    pub strict: bool,

    /// Output path for the enriched long-form CSV
    pub enriched_csv: Option<PathBuf>,

    /// Output path for the pivot CSV
    pub pivot_csv: Option<PathBuf>,

    /// Output path for the JSON run report
    pub report_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            samples: PathBuf::from("samples.csv"),
            characteristics: None,
            victim: None,
            source: ConfigSource::default(),
            mem_penalty: None,
            block_size: None,
            strict: false,
            enriched_csv: None,
            pivot_csv: Some(PathBuf::from("artifacts/pivot.csv")),
            report_json: None,
            print_summary: false,
        }
    }
}
