//! `ng_graph` — extracts an Angular project's module/route/component/
//! widget/service graph into `phase1-bundle.json`.
//!
//! Mirrors `packages/compiler-cli/src/bin/ngc.rs`'s flattened-exit-code
//! boundary: typed `CoreError`s stay inside `ng_graph_core`; this binary
//! only ever sees the `anyhow::Result` the orchestrator/CLI boundary
//! produces (spec.md §7 propagation policy, `SPEC_FULL.md` §3).

use std::process;

use ng_graph_cli::Config;

fn main() {
    let config = Config::from_args();

    match ng_graph_cli::run(&config) {
        Ok(output) => {
            println!(
                "wrote {} nodes, {} edges to {}",
                output.stats.node_count,
                output.stats.edge_count,
                config.output_dir.display()
            );
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
