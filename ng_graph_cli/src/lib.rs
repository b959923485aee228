//! Thin CLI wrapper over `ng_graph_core` (spec.md §6: "CLI wrapper as a
//! thin shell" — all extraction logic lives in the core crate; this
//! crate only parses configuration and reports the run).

pub mod config;

use anyhow::{Context, Result};
use ng_graph_core::logging::{ConsoleLogger, Logger};

pub use config::Config;

/// Runs the full pipeline for `config` and writes its output, returning
/// the core crate's pipeline artifacts for callers that want to inspect
/// or re-report them (e.g. the `ng_graph_napi` binding).
pub fn run(config: &Config) -> Result<ng_graph_core::PipelineOutput> {
    let logger = ConsoleLogger::new(config.log_level);
    logger.info(&format!(
        "extracting project graph for {}",
        config.project_root.display()
    ));

    ng_graph_core::run_and_write(
        &config.project_root,
        &config.ts_config_path,
        &config.output_dir,
        config.debug,
        &logger,
    )
    .with_context(|| format!("failed to extract project graph for {}", config.project_root.display()))
}
