//! Run command implementation.
//!
//! The run command:
//! 1. Loads samples and characteristics tables
//! 2. Joins characteristics and derives AAT and area
//! 3. Pivots the enriched rows
//! 4. Checks diagnostics against the ambiguity policy
//! 5. Writes output files

use super::models::RunArgs;
use crate::output::{
    render_terminal_summary, write_enriched_csv, write_pivot_csv, write_report, RunReport,
};
use crate::pipeline::{
    check_diagnostics, enrich_samples, load_inputs, AmbiguityPolicy, InputPaths, PipelineConfig,
    RunResult,
};
use crate::pivot::pivot_rows;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Resolve the configuration and apply command-line overrides
///
/// **Public** - shared with the validate command
pub fn resolve_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = args
        .source
        .load()
        .context("Failed to load pipeline configuration")?;

    if let Some(penalty) = args.mem_penalty {
        config = config.with_mem_penalty(penalty);
    }
    if let Some(block_size) = args.block_size {
        config = config.with_block_size(block_size);
    }
    if args.strict {
        config = config.with_ambiguity(AmbiguityPolicy::Reject);
    }

    config
        .validate()
        .context("Invalid configuration after overrides")?;

    Ok(config)
}

/// Execute the run command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Run command arguments
///
/// # Returns
/// The run result, after every requested output has been written
///
/// # Errors
/// * Configuration errors (unknown preset, invalid TOML, inconsistent settings)
/// * Missing required columns or unreadable input files
/// * Ambiguity policy violations (nothing is written in that case)
/// * File write errors
pub fn execute_run(args: RunArgs) -> Result<RunResult> {
    let start_time = Instant::now();

    info!("Starting run for samples: {}", args.samples.display());

    let config = resolve_config(&args)?;
    info!(
        "Configuration: hierarchy {}, formula {}, {} by {} / {}",
        config.hierarchy,
        config.formula,
        config.pivot.value,
        config.pivot.row_axis.column_name(),
        config.pivot.column_axis
    );

    // Step 1: Load inputs
    info!("Step 1/5: Loading samples and characteristics...");
    let paths = InputPaths {
        samples: &args.samples,
        characteristics: args.characteristics.as_deref(),
        victim: args.victim.as_deref(),
    };
    let inputs = load_inputs(&config, paths).context("Failed to load inputs")?;

    debug!(
        "Loaded {} samples, {} characteristics rows, {} victim rows",
        inputs.samples.len(),
        inputs.characteristics.len(),
        inputs.victim.len()
    );

    // Step 2: Join and derive
    info!("Step 2/5: Joining characteristics and deriving metrics...");
    let rows = enrich_samples(&config, inputs);

    // Step 3: Pivot
    info!("Step 3/5: Pivoting {} rows...", rows.len());
    let outcome = pivot_rows(&rows, &config.pivot);

    // Step 4: Diagnostics and policy
    info!("Step 4/5: Checking diagnostics ({} policy)...", config.ambiguity);
    let diagnostics = check_diagnostics(&config, &rows, &outcome)
        .context("Run rejected by ambiguity policy")?;
    info!("Diagnostics: {}", diagnostics.summary());

    let result = RunResult {
        config,
        rows,
        pivot: outcome.table,
        diagnostics,
    };

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");

    if let Some(path) = &args.enriched_csv {
        write_enriched_csv(&result.rows, result.config.hierarchy, path)
            .context("Failed to write enriched CSV")?;
        info!("✓ Enriched table written to: {}", path.display());
    }

    if let Some(path) = &args.pivot_csv {
        write_pivot_csv(&result.pivot, result.config.pivot.row_axis, path)
            .context("Failed to write pivot CSV")?;
        info!("✓ Pivot table written to: {}", path.display());
    }

    if let Some(path) = &args.report_json {
        write_report(&RunReport::from_run(&result), path).context("Failed to write run report")?;
        info!("✓ Run report written to: {}", path.display());
    }

    if args.print_summary {
        println!("{}", render_terminal_summary(&result));
    }

    let elapsed = start_time.elapsed();
    info!("Run completed in {:.2}s", elapsed.as_secs_f64());

    Ok(result)
}

/// Validate run arguments
///
/// **Public** - can be called before execute_run for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &RunArgs) -> Result<()> {
    if args.samples.as_os_str().is_empty() {
        anyhow::bail!("Samples path cannot be empty");
    }

    if let Some(penalty) = args.mem_penalty {
        if !penalty.is_finite() || penalty < 0.0 {
            anyhow::bail!("Memory penalty must be a non-negative number");
        }
    }

    if args.block_size == Some(0) {
        anyhow::bail!("Block size must be greater than 0");
    }

    if args.enriched_csv.is_none()
        && args.pivot_csv.is_none()
        && args.report_json.is_none()
        && !args.print_summary
    {
        anyhow::bail!("Nothing to do: pass --enriched, --pivot, --report or --summary");
    }

    Ok(())
}
