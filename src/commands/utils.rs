use super::models::ConfigSource;
use crate::loader::load_samples;
use crate::pipeline::presets;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Check a sample file against the columns a configuration needs
///
/// Returns the number of sample rows.
pub fn validate_samples_file(samples: &Path, source: &ConfigSource) -> Result<usize> {
    println!("Validating samples: {}", samples.display());

    let config = source
        .load()
        .context("Failed to load pipeline configuration")?;
    let rows = load_samples(samples, config.sample_layout())
        .with_context(|| format!("Samples do not match hierarchy '{}'", config.hierarchy))?;

    println!("✓ Valid sample file");
    println!("  Hierarchy: {}", config.hierarchy);
    println!("  Rows: {}", rows.len());
    println!(
        "  Rows with L2: {}",
        rows.iter().filter(|r| r.l2.is_some()).count()
    );
    println!(
        "  Rows with victim cache: {}",
        rows.iter().filter(|r| r.victim.is_some()).count()
    );

    Ok(rows.len())
}

/// Display the built-in presets
pub fn display_presets(show_details: bool) {
    println!("Built-in presets");
    println!();

    for p in presets() {
        println!("  {:<20} {}", p.name, p.description);
        if show_details {
            let c = &p.config;
            println!("    hierarchy = \"{}\"", c.hierarchy);
            println!("    formula = \"{}\"", c.formula);
            println!("    mem_penalty_ns = {}", c.mem_penalty_ns);
            println!("    block_size = {}", c.block_size);
            println!(
                "    pivot = {} x {} -> {}",
                c.pivot.row_axis.column_name(),
                c.pivot.column_axis,
                c.pivot.value
            );
        }
    }

    if !show_details {
        println!();
        println!("Use --show for preset settings");
    }
}

/// Display version information
pub fn display_version() {
    println!("cache-dse v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Average access time and area metrics for cache hierarchy design-space exploration.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_samples_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        std::fs::write(&path, " l1a, l1s, l1missrate\n1,1024,0.1\n2,2048,0.05\n").unwrap();

        let rows = validate_samples_file(&path, &ConfigSource::Preset("aat-vs-l1".to_string())).unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_validate_samples_file_missing_l2_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        std::fs::write(&path, " l1a, l1s, l1missrate\n1,1024,0.1\n").unwrap();

        let result = validate_samples_file(&path, &ConfigSource::Preset("aat-l1-l2".to_string()));
        assert!(result.is_err());
    }
}
