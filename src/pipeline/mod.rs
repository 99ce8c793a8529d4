//! The run engine: configuration, presets, diagnostics and orchestration.
//!
//! One engine serves every figure. A run is parameterized by the active
//! hierarchy levels, the AAT formula and the pivot axes.

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod presets;

pub use config::{load_config, parse_config, AmbiguityPolicy, PipelineConfig};
pub use diagnostics::{Diagnostics, LookupCounts};
pub use engine::{
    check_diagnostics, enrich_samples, load_inputs, run_pipeline, InputPaths, RunInputs, RunResult,
};
pub use presets::{preset, preset_names, presets, Preset};
