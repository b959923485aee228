//! Optional Node.js binding over `ng_graph_core` (not built by default —
//! `SPEC_FULL.md` §1 "binding" member). Mirrors the teacher's thin
//! `#[napi]`-wrapped `Compiler` struct in `packages/binding/src/lib.rs`,
//! scaled down to this crate's single operation: run the pipeline for a
//! project and return its output directory plus node/edge counts.
//! Building without `--features napi-bindings` compiles this crate down
//! to nothing but the plain-Rust `extract` function below.

use std::path::PathBuf;

use ng_graph_core::logging::{ConsoleLogger, LogLevel, Logger};

/// Runs the extraction pipeline and writes the bundle, returning
/// `(node_count, edge_count)`. The `napi`-gated wrapper below is the
/// only thing that differs between the library and Node.js builds.
pub fn extract(project_root: &str, ts_config_path: &str, output_dir: &str, debug: bool) -> anyhow::Result<(usize, usize)> {
    let logger = ConsoleLogger::new(LogLevel::Warn);
    let output = ng_graph_core::run_and_write(
        &PathBuf::from(project_root),
        &PathBuf::from(ts_config_path),
        &PathBuf::from(output_dir),
        debug,
        &logger,
    )?;
    Ok((output.stats.node_count, output.stats.edge_count))
}

#[cfg(feature = "napi-bindings")]
mod binding {
    use napi_derive::napi;

    #[napi(object)]
    pub struct GraphSummary {
        pub node_count: u32,
        pub edge_count: u32,
    }

    #[napi]
    pub fn extract_project_graph(
        project_root: String,
        ts_config_path: String,
        output_dir: String,
        debug: bool,
    ) -> napi::Result<GraphSummary> {
        super::extract(&project_root, &ts_config_path, &output_dir, debug)
            .map(|(nodes, edges)| GraphSummary {
                node_count: nodes as u32,
                edge_count: edges as u32,
            })
            .map_err(|e| napi::Error::from_reason(e.to_string()))
    }
}

#[cfg(feature = "napi-bindings")]
pub use binding::{extract_project_graph, GraphSummary};
