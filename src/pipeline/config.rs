//! Run configuration for the join -> derive -> pivot engine.
//!
//! A configuration picks the active hierarchy levels, the AAT formula and
//! the pivot axes. It can come from a built-in preset or a TOML file:
//!
//! ```toml
//! hierarchy = "l1-l2"
//! formula = "two-level"
//! mem_penalty_ns = 20.1
//! block_size = 32
//! ambiguity = "resolve"
//!
//! [pivot]
//! row_axis = "log2-l1-size"
//! column_axis = "l1-assoc"
//! value = "aat"
//! ```

use crate::enricher::{EnrichOptions, Hierarchy};
use crate::loader::SampleLayout;
use crate::metrics::Formula;
use crate::pivot::PivotSpec;
use crate::utils::config::{DEFAULT_BLOCK_SIZE, DEFAULT_MEM_PENALTY_NS};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// What to do when a lookup or pivot cell has more than one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Keep the deterministic resolution (first match / last write) and report it
    #[default]
    Resolve,
    /// Fail the run if any ambiguity was observed
    Reject,
}

impl fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve => write!(f, "resolve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Levels joined against the characteristics tables
    #[serde(default)]
    pub hierarchy: Hierarchy,

    /// AAT formula variant
    #[serde(default)]
    pub formula: Formula,

    /// Main-memory access penalty (same unit as the access times)
    #[serde(default = "PipelineConfig::default_mem_penalty")]
    pub mem_penalty_ns: f64,

    /// Block size component of the characteristics lookup key
    #[serde(default = "PipelineConfig::default_block_size")]
    pub block_size: u64,

    #[serde(default)]
    pub ambiguity: AmbiguityPolicy,

    pub pivot: PivotSpec,
}

impl PipelineConfig {
    fn default_mem_penalty() -> f64 {
        DEFAULT_MEM_PENALTY_NS
    }

    fn default_block_size() -> u64 {
        DEFAULT_BLOCK_SIZE
    }

    /// Configuration with default penalty, block size and policy
    pub fn new(hierarchy: Hierarchy, formula: Formula, pivot: PivotSpec) -> Self {
        Self {
            hierarchy,
            formula,
            mem_penalty_ns: DEFAULT_MEM_PENALTY_NS,
            block_size: DEFAULT_BLOCK_SIZE,
            ambiguity: AmbiguityPolicy::default(),
            pivot,
        }
    }

    pub fn with_mem_penalty(mut self, mem_penalty_ns: f64) -> Self {
        self.mem_penalty_ns = mem_penalty_ns;
        self
    }

    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// Check that every selected formula and axis has its levels available
    pub fn validate(&self) -> Result<(), ConfigError> {
        let has_l2 = self.hierarchy.has_l2();
        let has_victim = self.hierarchy.has_victim();

        if self.formula.requires_l2() && !has_l2 {
            return Err(invalid(format!(
                "formula '{}' needs an L2 but hierarchy is '{}'",
                self.formula, self.hierarchy
            )));
        }
        if self.formula.requires_victim() && !has_victim {
            return Err(invalid(format!(
                "formula '{}' needs a victim cache but hierarchy is '{}'",
                self.formula, self.hierarchy
            )));
        }

        let pivot = &self.pivot;
        if (pivot.row_axis.requires_l2() || pivot.column_axis.requires_l2() || pivot.value.requires_l2())
            && !has_l2
        {
            return Err(invalid(format!(
                "pivot uses L2 fields but hierarchy is '{}'",
                self.hierarchy
            )));
        }
        if (pivot.column_axis.requires_victim() || pivot.value.requires_victim()) && !has_victim {
            return Err(invalid(format!(
                "pivot uses victim cache fields but hierarchy is '{}'",
                self.hierarchy
            )));
        }

        if !self.mem_penalty_ns.is_finite() || self.mem_penalty_ns < 0.0 {
            return Err(invalid(format!(
                "mem_penalty_ns must be a non-negative number, got {}",
                self.mem_penalty_ns
            )));
        }
        if self.block_size == 0 {
            return Err(invalid("block_size must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Sample columns this configuration needs
    pub fn sample_layout(&self) -> SampleLayout {
        SampleLayout {
            with_l2: self.hierarchy.has_l2(),
            with_victim: self.hierarchy.has_victim(),
            require_block_size: self.pivot.row_axis.requires_block_size(),
        }
    }

    /// Settings for the enrichment pass
    pub fn enrich_options(&self) -> EnrichOptions {
        EnrichOptions {
            hierarchy: self.hierarchy,
            formula: self.formula,
            block_size: self.block_size,
            mem_penalty_ns: self.mem_penalty_ns,
        }
    }

    /// Whether the run reads the cache characteristics table at all
    pub fn needs_characteristics(&self) -> bool {
        use crate::pivot::ValueField;

        self.formula != Formula::None
            || matches!(
                self.pivot.value,
                ValueField::L1AccessTime | ValueField::L2AccessTime | ValueField::TotalArea
            )
    }

    /// Whether the run reads the victim characteristics table
    pub fn needs_victim_characteristics(&self) -> bool {
        (self.hierarchy.has_victim() && self.needs_characteristics())
            || self.pivot.value == crate::pivot::ValueField::VictimAccessTime
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Load a pipeline configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
/// * `ConfigError::Invalid` - If the configuration is inconsistent
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate a pipeline configuration from TOML text
pub fn parse_config(contents: &str) -> Result<PipelineConfig, ConfigError> {
    let config: PipelineConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
