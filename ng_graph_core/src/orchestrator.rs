//! Fixed pipeline order (spec.md §2): AST project load, then component
//! extraction, module extraction, route extraction, event/handler
//! mapping, service discovery, guard summarization, graph assembly,
//! validation, serialization. Module and component extraction depend
//! only on the loaded project, not on each other, so the orchestrator
//! runs them with `rayon::join` — the one place this crate's otherwise
//! single-threaded core (§5) goes parallel, and only over an
//! order-independent per-file scan whose results are merged back into
//! sorted `BTreeMap`s before anything downstream reads them.

use std::collections::BTreeMap;
use std::path::Path;

use crate::ast::Project;
use crate::components::{self, ComponentExtraction};
use crate::error::CoreResult;
use crate::events;
use crate::graph::{self, GraphInputs};
use crate::guards;
use crate::logging::Logger;
use crate::model::{Component, ConstraintSummary, Module, Multigraph, Route, Service, Stats, Widget, WidgetEvent};
use crate::modules;
use crate::routes::{self, ComponentRouteMap, RouteMap};
use crate::serialize::{self, Bundle};
use crate::services;

pub struct PipelineOutput {
    pub project: Project,
    pub modules: BTreeMap<String, Module>,
    pub routes: RouteMap,
    pub component_routes: ComponentRouteMap,
    pub components: BTreeMap<String, Component>,
    pub widgets: BTreeMap<String, Widget>,
    pub widget_composition: Vec<(String, String)>,
    pub widget_events: Vec<WidgetEvent>,
    pub services: BTreeMap<String, Service>,
    pub guard_summaries: BTreeMap<String, ConstraintSummary>,
    pub graph: Multigraph,
    pub stats: Stats,
}

/// Runs every extraction stage and assembles + validates the graph, but
/// does not write any output (see [`run_and_write`] for the CLI's
/// typical entry point). Exposed separately so library embedders and
/// tests can inspect intermediate artifacts.
pub fn run(project_root: &Path, ts_config_path: &Path, logger: &dyn Logger) -> CoreResult<PipelineOutput> {
    logger.info(&format!("loading project at {}", project_root.display()));
    let project = Project::load(project_root, ts_config_path)?;
    logger.debug(&format!("loaded {} source files", project.files().count()));

    let (mut modules, ComponentExtraction {
        components,
        widgets,
        widget_composition,
    }) = rayon::join(
        || modules::extract_modules(&project),
        || components::extract_components(&project, logger),
    );

    let component_list: Vec<Component> = components.values().cloned().collect();
    let (routes, component_routes) = routes::extract_routes(&project, &component_list, logger);
    logger.debug(&format!("discovered {} routes", routes.routes.len()));

    modules::finalize_roles(&project, &mut modules, &routes);

    let widget_events = events::analyze_events(&project, &components, &widgets);
    let services = services::extract_services(&project);
    let guard_summaries = guards::summarize_guards(&project, &routes);

    let inputs = GraphInputs {
        project: &project,
        modules: &modules,
        routes: &routes,
        components: &components,
        widgets: &widgets,
        widget_composition: &widget_composition,
        services: &services,
        widget_events: &widget_events,
        guard_summaries: &guard_summaries,
    };
    let graph_built = graph::build_graph(&inputs);
    crate::validate::validate(&graph_built)?;
    let stats = graph::compute_stats(&graph_built);

    Ok(PipelineOutput {
        project,
        modules,
        routes,
        component_routes,
        components,
        widgets,
        widget_composition,
        widget_events,
        services,
        guard_summaries,
        graph: graph_built,
        stats,
    })
}

/// Runs the full pipeline and writes `phase1-bundle.json` (plus the
/// `--debug` split directory when `debug` is set) under `output_dir`.
pub fn run_and_write(
    project_root: &Path,
    ts_config_path: &Path,
    output_dir: &Path,
    debug: bool,
    logger: &dyn Logger,
) -> CoreResult<PipelineOutput> {
    let output = run(project_root, ts_config_path, logger)?;
    let bundle = Bundle {
        graph: &output.graph,
        stats: &output.stats,
        modules: &output.modules,
        routes: &output.routes.routes,
        components: &output.components,
        widgets: &output.widgets,
        services: &output.services,
        widget_events: &output.widget_events,
    };
    serialize::write_output(output_dir, &bundle, debug)?;
    logger.info(&format!("wrote bundle to {}", output_dir.display()));
    Ok(output)
}
