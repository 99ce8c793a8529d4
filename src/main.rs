//! cache-dse CLI
//!
//! Average access time and area metrics for cache hierarchy
//! design-space exploration.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use cache_dse::commands::{
    display_presets, display_version, execute_run, validate_args, validate_samples_file,
    ConfigSource, RunArgs,
};

/// cache-dse - AAT and area metrics for cache design-space exploration
#[derive(Parser, Debug)]
#[command(name = "cache-dse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Preset or configuration file (exactly one)
#[derive(Args, Debug)]
struct SourceArgs {
    /// Built-in preset name (see `cache-dse presets`)
    #[arg(long, conflicts_with = "config", required_unless_present = "config")]
    preset: Option<String>,

    /// TOML pipeline configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self) -> Result<ConfigSource> {
        match (self.preset, self.config) {
            (Some(name), _) => Ok(ConfigSource::Preset(name)),
            (None, Some(path)) => Ok(ConfigSource::File(path)),
            (None, None) => anyhow::bail!("Either --preset or --config is required"),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Join, derive and pivot a sample file
    Run {
        /// Simulator sample CSV
        #[arg(short, long)]
        samples: PathBuf,

        /// Cache characteristics CSV (size, assoc, blocksize, at, area)
        #[arg(short, long)]
        characteristics: Option<PathBuf>,

        /// Victim cache characteristics CSV (vcs, at, area)
        #[arg(long)]
        victim: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Main-memory access penalty (overrides the configuration)
        #[arg(long)]
        mem_penalty: Option<f64>,

        /// Block size used for characteristics lookups (overrides the configuration)
        #[arg(long)]
        block_size: Option<u64>,

        /// Fail on any ambiguous lookup or pivot cell
        #[arg(long)]
        strict: bool,

        /// Output path for the enriched long-form CSV
        #[arg(long)]
        enriched: Option<PathBuf>,

        /// Output path for the pivot CSV
        #[arg(short, long)]
        pivot: Option<PathBuf>,

        /// Output path for the JSON run report
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Check that a sample file has the columns a configuration needs
    Validate {
        /// Simulator sample CSV
        #[arg(short, long)]
        samples: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List built-in presets
    Presets {
        /// Show preset settings
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Run {
            samples,
            characteristics,
            victim,
            source,
            mem_penalty,
            block_size,
            strict,
            enriched,
            pivot,
            report,
            summary,
        } => {
            let args = RunArgs {
                samples,
                characteristics,
                victim,
                source: source.into_source()?,
                mem_penalty,
                block_size,
                strict,
                enriched_csv: enriched,
                pivot_csv: pivot,
                report_json: report,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_run(args)?;
        }

        Commands::Validate { samples, source } => {
            validate_samples_file(&samples, &source.into_source()?)?;
        }

        Commands::Presets { show } => {
            display_presets(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
