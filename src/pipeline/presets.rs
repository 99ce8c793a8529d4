//! Built-in configurations, one per standard design-space figure.

use super::config::PipelineConfig;
use crate::enricher::Hierarchy;
use crate::metrics::Formula;
use crate::pivot::{ColumnAxis, PivotSpec, RowAxis, ValueField};
use crate::utils::error::ConfigError;

/// A named, documented configuration
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: PipelineConfig,
}

fn preset_entry(
    name: &'static str,
    description: &'static str,
    hierarchy: Hierarchy,
    formula: Formula,
    row_axis: RowAxis,
    column_axis: ColumnAxis,
    value: ValueField,
) -> Preset {
    Preset {
        name,
        description,
        config: PipelineConfig::new(
            hierarchy,
            formula,
            PivotSpec {
                row_axis,
                column_axis,
                value,
            },
        ),
    }
}

/// All built-in presets, in figure order
pub fn presets() -> Vec<Preset> {
    vec![
        preset_entry(
            "miss-rate-vs-l1",
            "L1 miss rate by log2 L1 size, one column per associativity",
            Hierarchy::L1,
            Formula::None,
            RowAxis::Log2L1Size,
            ColumnAxis::L1Assoc,
            ValueField::L1MissRate,
        ),
        preset_entry(
            "aat-vs-l1",
            "Single-level AAT by log2 L1 size, one column per associativity",
            Hierarchy::L1,
            Formula::SingleLevel,
            RowAxis::Log2L1Size,
            ColumnAxis::L1Assoc,
            ValueField::Aat,
        ),
        preset_entry(
            "aat-l1-l2",
            "Two-level AAT by log2 L1 size, one column per L1 associativity",
            Hierarchy::L1L2,
            Formula::TwoLevel,
            RowAxis::Log2L1Size,
            ColumnAxis::L1Assoc,
            ValueField::Aat,
        ),
        preset_entry(
            "miss-rate-vs-block",
            "L1 miss rate by log2 block size, one column per L1 size",
            Hierarchy::L1,
            Formula::None,
            RowAxis::Log2BlockSize,
            ColumnAxis::L1Size,
            ValueField::L1MissRate,
        ),
        preset_entry(
            "aat-vs-l2-size",
            "Two-level AAT by log2 L1 size, one column per L2 size",
            Hierarchy::L1L2,
            Formula::TwoLevel,
            RowAxis::Log2L1Size,
            ColumnAxis::L2Size,
            ValueField::Aat,
        ),
        preset_entry(
            "aat-victim",
            "AAT with a victim cache by log2 L1 size, one column per L1/victim configuration",
            Hierarchy::L1L2Victim,
            Formula::ThreeLevelVictim,
            RowAxis::Log2L1Size,
            ColumnAxis::VictimConfig,
            ValueField::Aat,
        ),
    ]
}

/// Look up a preset configuration by name
///
/// # Errors
/// * `ConfigError::UnknownPreset` - If no preset has this name
pub fn preset(name: &str) -> Result<PipelineConfig, ConfigError> {
    presets()
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.config)
        .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

/// Names of all presets, for help and error messages
pub fn preset_names() -> Vec<&'static str> {
    presets().iter().map(|p| p.name).collect()
}
