//! Join, derive and pivot in one pass over an in-memory dataset.

use super::config::{AmbiguityPolicy, PipelineConfig};
use super::diagnostics::Diagnostics;
use crate::enricher::{build_characteristics_index, build_victim_index, EnrichedRow, Enricher};
use crate::loader::{
    load_characteristics, load_samples, load_victim_characteristics, CharacteristicsEntry,
    SampleRow, VictimCharacteristicsEntry,
};
use crate::pivot::{pivot_rows, PivotOutcome, PivotTable};
use crate::utils::error::{ConfigError, PipelineError};
use log::{debug, warn};
use std::path::Path;

/// Everything a run reads
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub samples: Vec<SampleRow>,
    pub characteristics: Vec<CharacteristicsEntry>,
    pub victim: Vec<VictimCharacteristicsEntry>,
}

/// Input file locations
#[derive(Debug, Clone, Copy)]
pub struct InputPaths<'a> {
    pub samples: &'a Path,
    pub characteristics: Option<&'a Path>,
    pub victim: Option<&'a Path>,
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct RunResult {
    pub config: PipelineConfig,
    /// Enriched rows in input order
    pub rows: Vec<EnrichedRow>,
    pub pivot: PivotTable,
    pub diagnostics: Diagnostics,
}

/// Load the files a configuration needs
///
/// # Errors
/// * `PipelineError::Config` - If a needed characteristics table was not given
/// * `PipelineError::Load` - If a file cannot be read or lacks a required column
pub fn load_inputs(config: &PipelineConfig, paths: InputPaths<'_>) -> Result<RunInputs, PipelineError> {
    let samples = load_samples(paths.samples, config.sample_layout())?;
    debug!("Loaded {} sample rows", samples.len());

    let characteristics = match paths.characteristics {
        Some(path) => load_characteristics(path)?,
        None if config.needs_characteristics() => {
            return Err(ConfigError::Invalid(format!(
                "formula '{}' with value '{}' needs a characteristics table",
                config.formula, config.pivot.value
            ))
            .into());
        }
        None => Vec::new(),
    };

    let victim = match paths.victim {
        Some(path) => load_victim_characteristics(path)?,
        None if config.needs_victim_characteristics() => {
            return Err(ConfigError::Invalid(format!(
                "hierarchy '{}' needs a victim cache characteristics table",
                config.hierarchy
            ))
            .into());
        }
        None => Vec::new(),
    };

    debug!(
        "Loaded {} characteristics rows, {} victim characteristics rows",
        characteristics.len(),
        victim.len()
    );

    Ok(RunInputs {
        samples,
        characteristics,
        victim,
    })
}

/// Attach characteristics and derived metrics to every sample
pub fn enrich_samples(config: &PipelineConfig, inputs: RunInputs) -> Vec<EnrichedRow> {
    let characteristics = build_characteristics_index(&inputs.characteristics);
    let victim = build_victim_index(&inputs.victim);

    if config.needs_characteristics() && characteristics.is_empty() {
        warn!("Characteristics table is empty, every cache lookup will miss");
    }
    if config.needs_victim_characteristics() && victim.is_empty() {
        warn!("Victim characteristics table is empty, every victim lookup will miss");
    }

    Enricher::new(&characteristics, &victim, config.enrich_options()).enrich(inputs.samples)
}

/// Tally diagnostics for a finished pivot and apply the ambiguity policy
///
/// # Errors
/// * `PipelineError::PolicyViolation` - If the policy is `reject` and anything was ambiguous
pub fn check_diagnostics(
    config: &PipelineConfig,
    rows: &[EnrichedRow],
    outcome: &PivotOutcome,
) -> Result<Diagnostics, PipelineError> {
    let diagnostics = Diagnostics::collect(rows, outcome, config);
    diagnostics.log_warnings();

    if config.ambiguity == AmbiguityPolicy::Reject && diagnostics.has_ambiguity() {
        return Err(PipelineError::PolicyViolation {
            ambiguous_lookups: diagnostics.ambiguous_lookups(),
            ambiguous_cells: diagnostics.ambiguous_cells,
        });
    }

    Ok(diagnostics)
}

/// Run the whole transform on already-loaded inputs
///
/// # Errors
/// * `PipelineError::Config` - If the configuration is inconsistent
/// * `PipelineError::PolicyViolation` - If the ambiguity policy rejects the run
pub fn run_pipeline(config: &PipelineConfig, inputs: RunInputs) -> Result<RunResult, PipelineError> {
    config.validate()?;

    let rows = enrich_samples(config, inputs);
    let outcome = pivot_rows(&rows, &config.pivot);
    let diagnostics = check_diagnostics(config, &rows, &outcome)?;

    Ok(RunResult {
        config: config.clone(),
        rows,
        pivot: outcome.table,
        diagnostics,
    })
}
