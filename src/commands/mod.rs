//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod run;
pub mod utils;

// Re-export main command functions
pub use models::{ConfigSource, RunArgs};
pub use run::{execute_run, resolve_config, validate_args};
pub use utils::{display_presets, display_version, validate_samples_file};
