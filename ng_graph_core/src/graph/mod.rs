//! Graph Builder (spec.md §4.8): assembles the [`Multigraph`] from
//! every previously extracted entity — nodes for modules, routes,
//! components, widgets and services; structural edges from their
//! declared relationships; executable edges from navigation/handler/
//! service-call evidence.

mod entry;
mod fnv;
mod navigation;

use std::collections::BTreeMap;

use crate::ast::{access, Project, SourceFile};
use crate::model::{
    BindingKind, Component, ConstraintSummary, ConstraintSurface, Edge, EdgeHandler, EdgeKind, EdgeTrigger, Module,
    Multigraph, Node, NodeKind, Route, Service, SourceRef, Widget, WidgetEvent,
};
use crate::routes::RouteMap;
use navigation::NavIndex;

pub struct GraphInputs<'a> {
    pub project: &'a Project,
    pub modules: &'a BTreeMap<String, Module>,
    pub routes: &'a RouteMap,
    pub components: &'a BTreeMap<String, Component>,
    pub widgets: &'a BTreeMap<String, Widget>,
    pub widget_composition: &'a [(String, String)],
    pub services: &'a BTreeMap<String, Service>,
    pub widget_events: &'a [WidgetEvent],
    pub guard_summaries: &'a BTreeMap<String, ConstraintSummary>,
}

pub fn build_graph(inputs: &GraphInputs) -> Multigraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut group_counters: BTreeMap<(String, &'static str), u32> = BTreeMap::new();

    let entry_routes = entry::compute_entry_route_ids(&inputs.routes.routes);
    let events_by_widget = group_events_by_widget(inputs.widget_events);

    emit_module_nodes(inputs.modules, &mut nodes);
    emit_route_nodes(&inputs.routes.routes, inputs.guard_summaries, &entry_routes, &mut nodes);
    emit_component_nodes(inputs.components, &mut nodes);
    emit_widget_nodes(inputs.widgets, &events_by_widget, &mut nodes);
    emit_service_nodes(inputs.services, &mut nodes);

    emit_module_import_export_edges(inputs, &mut edges, &mut group_counters);
    emit_module_declares_component_edges(inputs.components, &mut edges, &mut group_counters);
    emit_module_declares_route_edges(inputs.modules, &mut edges, &mut group_counters);
    emit_route_has_child_edges(&inputs.routes.routes, &mut edges, &mut group_counters);
    emit_route_activates_component_edges(&inputs.routes.routes, inputs.guard_summaries, &mut edges, &mut group_counters);
    emit_component_contains_widget_edges(inputs.components, &mut edges, &mut group_counters);
    emit_widget_composes_widget_edges(inputs.widget_composition, inputs.widgets, &mut edges, &mut group_counters);
    emit_component_composes_component_edges(inputs.components, &mut edges, &mut group_counters);
    emit_module_provides_service_edges(inputs, &mut edges, &mut group_counters);
    // COMPONENT_PROVIDES_SERVICE is enumerated in EdgeKind but never emitted
    // (spec.md §9 Open Question c): the component decorator's own
    // `providers` array isn't extracted into the Component model, so there's
    // nothing to resolve this edge from.

    let nav_index = NavIndex::build(inputs.routes.routes.values());
    emit_widget_navigation_edges(inputs.widgets, &nav_index, &mut nodes, &mut edges, &mut group_counters);
    emit_widget_event_edges(inputs, &nav_index, &mut nodes, &mut edges, &mut group_counters);
    emit_route_redirect_edges(&inputs.routes.routes, inputs.guard_summaries, &mut edges, &mut group_counters);

    edges.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    Multigraph { nodes, edges }
}

fn group_events_by_widget(events: &[WidgetEvent]) -> BTreeMap<String, Vec<&WidgetEvent>> {
    let mut out: BTreeMap<String, Vec<&WidgetEvent>> = BTreeMap::new();
    for e in events {
        out.entry(e.widget_id.clone()).or_default().push(e);
    }
    out
}

/// Lower-cases `routerlink`/`href` to the synthetic `navigation` event
/// name, otherwise strips parens and lower-cases; falls back to
/// `unknown` for an empty result (spec.md §4.6 "event name
/// normalization").
fn normalize_event_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("routerlink") || lower.contains("href") {
        return "navigation".to_string();
    }
    let stripped: String = lower.chars().filter(|c| *c != '(' && *c != ')').collect();
    if stripped.is_empty() {
        "unknown".to_string()
    } else {
        stripped
    }
}

fn next_group_index(counters: &mut BTreeMap<(String, &'static str), u32>, from: &str, kind: EdgeKind) -> u32 {
    let key = (from.to_string(), kind.as_str());
    let counter = counters.entry(key).or_insert(0);
    let idx = *counter;
    *counter += 1;
    idx
}

#[allow(clippy::too_many_arguments)]
fn push_edge_full(
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
    kind: EdgeKind,
    from: &str,
    to: Option<&str>,
    refs: Vec<SourceRef>,
    constraints: ConstraintSurface,
    is_system: Option<bool>,
    trigger: Option<EdgeTrigger>,
    handler: Option<EdgeHandler>,
    target_route_id: Option<String>,
    target_text: Option<String>,
) {
    let group_index = next_group_index(counters, from, kind);
    edges.push(Edge {
        id: Edge::make_id(from, kind, to, group_index),
        kind,
        from: from.to_string(),
        to: to.map(|s| s.to_string()),
        constraints,
        refs,
        is_system,
        trigger,
        handler,
        target_route_id,
        target_text,
    });
}

fn push_edge(
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
    kind: EdgeKind,
    from: &str,
    to: Option<&str>,
    refs: Vec<SourceRef>,
    constraints: ConstraintSurface,
) {
    push_edge_full(edges, counters, kind, from, to, refs, constraints, None, None, None, None, None);
}

fn emit_module_nodes(modules: &BTreeMap<String, Module>, out: &mut Vec<Node>) {
    for m in modules.values() {
        out.push(Node {
            id: m.id.clone(),
            kind: NodeKind::Module,
            label: m.name.clone(),
            refs: vec![SourceRef::from(&m.origin)],
            metadata: serde_json::json!({
                "name": m.name,
                "file": m.id,
                "isStandaloneRoot": m.is_standalone_root_flag(),
                "role": format!("{:?}", m.role),
                "hasBootstrap": m.has_bootstrap,
                "ownedRoutes": m.owned_routes,
            }),
        });
    }
}

fn emit_route_nodes(
    routes: &BTreeMap<String, Route>,
    guard_summaries: &BTreeMap<String, ConstraintSummary>,
    entry_routes: &std::collections::BTreeSet<String>,
    out: &mut Vec<Node>,
) {
    for r in routes.values() {
        let redirect_to = match r {
            Route::RedirectRoute { redirect_to, .. } => Some(redirect_to.clone()),
            _ => None,
        };
        let roles = guard_summaries
            .get(r.id())
            .map(|s| s.roles_required.clone())
            .unwrap_or_default();
        out.push(Node {
            id: r.id().to_string(),
            kind: NodeKind::Route,
            label: r.full_path().to_string(),
            refs: vec![SourceRef::from(&r.common().origin)],
            metadata: serde_json::json!({
                "fullPath": r.full_path(),
                "path": r.common().raw_path,
                "isTopLevel": r.common().parent_id.is_none(),
                "isEntry": entry_routes.contains(r.id()),
                "isWildcard": r.is_wildcard(),
                "params": r.common().params.route_params,
                "guards": r.common().guards.iter().map(|g| g.guard_name.clone()).collect::<Vec<_>>(),
                "roles": roles,
                "redirectTo": redirect_to,
                "variant": route_variant_label(r),
            }),
        });
    }
}

fn route_variant_label(r: &Route) -> &'static str {
    match r {
        Route::ComponentRoute { .. } => "component",
        Route::RedirectRoute { .. } => "redirect",
        Route::WildcardRoute { .. } => "wildcard",
    }
}

fn emit_component_nodes(components: &BTreeMap<String, Component>, out: &mut Vec<Node>) {
    for c in components.values() {
        let template_file = match &c.template_source {
            crate::model::TemplateSource::Url(path) => Some(path.clone()),
            crate::model::TemplateSource::Inline => None,
        };
        out.push(Node {
            id: c.id.clone(),
            kind: NodeKind::Component,
            label: c.name.clone(),
            refs: vec![SourceRef::from(&c.origin)],
            metadata: serde_json::json!({
                "name": c.name,
                "file": c.file,
                "selector": c.selector,
                "templateFile": template_file,
            }),
        });
    }
}

fn emit_widget_nodes(
    widgets: &BTreeMap<String, Widget>,
    events_by_widget: &BTreeMap<String, Vec<&WidgetEvent>>,
    out: &mut Vec<Node>,
) {
    for w in widgets.values() {
        let own_events = events_by_widget.get(&w.id);
        let mut event_names: Vec<String> = Vec::new();
        let mut handler_text_by_name: BTreeMap<String, String> = BTreeMap::new();
        if let Some(events) = own_events {
            for e in *events {
                let name = normalize_event_name(&e.event_type);
                if let Some(handler) = &e.handler_name {
                    handler_text_by_name.insert(name.clone(), handler.clone());
                }
                event_names.push(name);
            }
        }
        event_names.sort();
        event_names.dedup();

        let router_link_text = find_binding_or_attr(w, "routerlink");
        let static_href = w
            .attributes
            .iter()
            .find(|(k, _)| k.to_lowercase() == "href")
            .map(|(_, v)| v.clone());

        out.push(Node {
            id: w.id.clone(),
            kind: NodeKind::Widget,
            label: w.text_label.clone().unwrap_or_else(|| w.tag.clone()),
            refs: vec![SourceRef::from(&w.origin)],
            metadata: serde_json::json!({
                "componentId": w.component_id,
                "widgetKind": format!("{:?}", w.kind),
                "tagName": w.tag,
                "eventNames": event_names,
                "eventHandlerTextByName": handler_text_by_name,
                "routerLinkText": router_link_text,
                "staticHref": static_href,
                "attributes": w.attributes,
            }),
        });
    }
}

fn emit_service_nodes(services: &BTreeMap<String, Service>, out: &mut Vec<Node>) {
    for s in services.values() {
        out.push(Node {
            id: s.id.clone(),
            kind: NodeKind::Service,
            label: s.name.clone(),
            refs: vec![SourceRef::from(&s.origin)],
            metadata: serde_json::json!({ "name": s.name, "file": s.file, "providedIn": s.provided_in }),
        });
    }
}

fn resolve_identifier<'a>(
    project: &Project,
    from_file: &SourceFile,
    name: &str,
    by_file_and_name: &BTreeMap<(String, String), &'a str>,
) -> Option<String> {
    let from_path = from_file.path.to_string_lossy().to_string();
    if let Some(id) = by_file_and_name.get(&(from_path.clone(), name.to_string())) {
        return Some((*id).to_string());
    }
    let specifier = access::find_import_specifier(from_file, name)?;
    let target = access::resolve_import_target(project, &from_path, &specifier)?;
    by_file_and_name.get(&(target, name.to_string())).map(|s| s.to_string())
}

fn emit_module_import_export_edges(
    inputs: &GraphInputs,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    let mut module_by_file_and_name: BTreeMap<(String, String), &str> = BTreeMap::new();
    for m in inputs.modules.values() {
        module_by_file_and_name.insert((m.id.clone(), m.name.clone()), m.id.as_str());
    }

    for m in inputs.modules.values() {
        let Some(file) = inputs.project.get(&m.id) else { continue };
        for name in &m.imports {
            if let Some(target) = resolve_identifier(inputs.project, file, name, &module_by_file_and_name) {
                if target != m.id {
                    let origin = m.import_origins.get(name).unwrap_or(&m.origin);
                    push_edge(
                        edges,
                        counters,
                        EdgeKind::ModuleImportsModule,
                        &m.id,
                        Some(&target),
                        vec![SourceRef::from(origin)],
                        ConstraintSurface::default(),
                    );
                }
            }
        }
        for name in &m.exports {
            if let Some(target) = resolve_identifier(inputs.project, file, name, &module_by_file_and_name) {
                if target != m.id {
                    let origin = m.export_origins.get(name).unwrap_or(&m.origin);
                    push_edge(
                        edges,
                        counters,
                        EdgeKind::ModuleExportsModule,
                        &m.id,
                        Some(&target),
                        vec![SourceRef::from(origin)],
                        ConstraintSurface::default(),
                    );
                }
            }
        }
    }
}

fn emit_module_declares_component_edges(
    components: &BTreeMap<String, Component>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for c in components.values() {
        for module_id in &c.declaring_modules {
            push_edge(
                edges,
                counters,
                EdgeKind::ModuleDeclaresComponent,
                module_id,
                Some(&c.id),
                vec![SourceRef::from(&c.origin)],
                ConstraintSurface::default(),
            );
        }
    }
}

fn emit_module_declares_route_edges(
    modules: &BTreeMap<String, Module>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for m in modules.values() {
        for route_id in &m.owned_routes {
            push_edge(
                edges,
                counters,
                EdgeKind::ModuleDeclaresRoute,
                &m.id,
                Some(route_id),
                vec![SourceRef::from(&m.origin)],
                ConstraintSurface::default(),
            );
        }
    }
}

fn emit_route_has_child_edges(
    routes: &BTreeMap<String, Route>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for r in routes.values() {
        for child_id in &r.common().child_ids {
            push_edge(
                edges,
                counters,
                EdgeKind::RouteHasChild,
                r.id(),
                Some(child_id),
                vec![SourceRef::from(&r.common().origin)],
                ConstraintSurface::default(),
            );
        }
    }
}

fn constraint_surface_for_route(r: &Route, summaries: &BTreeMap<String, ConstraintSummary>) -> ConstraintSurface {
    let guards: Vec<String> = r.common().guards.iter().map(|g| g.guard_name.clone()).collect();
    let roles = summaries.get(r.id()).map(|s| s.roles_required.clone()).unwrap_or_default();
    ConstraintSurface {
        required_params: r.common().params.route_params.clone(),
        guards,
        roles,
        ui_atoms: Vec::new(),
        evidence: Vec::new(),
    }
    .sorted_unique()
}

fn emit_route_activates_component_edges(
    routes: &BTreeMap<String, Route>,
    guard_summaries: &BTreeMap<String, ConstraintSummary>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for r in routes.values() {
        if let Some(component_id) = r.resolved_component_id() {
            let constraints = constraint_surface_for_route(r, guard_summaries);
            push_edge(
                edges,
                counters,
                EdgeKind::RouteActivatesComponent,
                r.id(),
                Some(component_id),
                vec![SourceRef::from(&r.common().origin)],
                constraints,
            );
        }
    }
}

fn emit_component_contains_widget_edges(
    components: &BTreeMap<String, Component>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for c in components.values() {
        for widget_id in &c.widget_ids {
            push_edge(
                edges,
                counters,
                EdgeKind::ComponentContainsWidget,
                &c.id,
                Some(widget_id),
                vec![SourceRef::from(&c.template_origin)],
                ConstraintSurface::default(),
            );
        }
    }
}

fn emit_widget_composes_widget_edges(
    composition: &[(String, String)],
    widgets: &BTreeMap<String, Widget>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for (parent, child) in composition {
        let mut refs = Vec::new();
        if let Some(w) = widgets.get(parent) {
            refs.push(SourceRef::from(&w.origin));
        }
        if let Some(w) = widgets.get(child) {
            refs.push(SourceRef::from(&w.origin));
        }
        push_edge(
            edges,
            counters,
            EdgeKind::WidgetComposesWidget,
            parent,
            Some(child),
            refs,
            ConstraintSurface::default(),
        );
    }
}

fn emit_component_composes_component_edges(
    components: &BTreeMap<String, Component>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    let mut by_selector: BTreeMap<String, &str> = BTreeMap::new();
    for c in components.values() {
        if !c.selector.is_empty() {
            by_selector.insert(c.selector.to_lowercase(), c.id.as_str());
        }
    }
    for c in components.values() {
        for selector in &c.nested_component_selectors {
            if let Some(target) = by_selector.get(selector.to_lowercase().as_str()) {
                if *target != c.id {
                    push_edge(
                        edges,
                        counters,
                        EdgeKind::ComponentComposesComponent,
                        &c.id,
                        Some(target),
                        vec![SourceRef::from(&c.template_origin)],
                        ConstraintSurface::default(),
                    );
                }
            }
        }
    }
}

fn emit_module_provides_service_edges(
    inputs: &GraphInputs,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    let mut service_by_file_and_name: BTreeMap<(String, String), &str> = BTreeMap::new();
    for s in inputs.services.values() {
        service_by_file_and_name.insert((s.file.clone(), s.name.clone()), s.id.as_str());
    }

    let mut already_provided: std::collections::BTreeSet<(String, String)> = std::collections::BTreeSet::new();

    for m in inputs.modules.values() {
        let Some(file) = inputs.project.get(&m.id) else { continue };
        for name in &m.providers {
            if let Some(target) = resolve_identifier(inputs.project, file, name, &service_by_file_and_name) {
                already_provided.insert((m.id.clone(), target.clone()));
                push_edge(
                    edges,
                    counters,
                    EdgeKind::ModuleProvidesService,
                    &m.id,
                    Some(&target),
                    vec![SourceRef::from(&m.origin)],
                    ConstraintSurface::default(),
                );
            }
        }
    }

    // `providedIn: 'root'` services are implicitly provided by the
    // resolved root module, unless a module already provides them
    // explicitly (spec.md §4.8 "MODULE_PROVIDES_SERVICE").
    let root_module = inputs
        .modules
        .values()
        .find(|m| m.has_bootstrap || m.name.to_lowercase() == "appmodule" || m.name.to_lowercase() == "approotmodule");
    if let Some(root) = root_module {
        for s in inputs.services.values() {
            if s.provided_in.as_deref() == Some("root") && !already_provided.contains(&(root.id.clone(), s.id.clone())) {
                push_edge(
                    edges,
                    counters,
                    EdgeKind::ModuleProvidesService,
                    &root.id,
                    Some(&s.id),
                    vec![SourceRef::from(&s.origin)],
                    ConstraintSurface::default(),
                );
            }
        }
    }
}

fn find_binding_or_attr(w: &Widget, name_lower: &str) -> Option<String> {
    for b in &w.bindings {
        if b.name.to_lowercase() == name_lower && matches!(b.kind, BindingKind::BoundAttribute) {
            return Some(b.value.clone());
        }
    }
    w.attributes
        .iter()
        .find(|(k, _)| k.to_lowercase() == name_lower)
        .map(|(_, v)| v.clone())
}

fn find_binding_or_attr_origin<'a>(w: &'a Widget, name_lower: &str) -> Option<&'a crate::model::Origin> {
    w.bindings
        .iter()
        .find(|b| b.name.to_lowercase() == name_lower && matches!(b.kind, BindingKind::BoundAttribute))
        .map(|b| &b.origin)
}

/// `WIDGET_NAVIGATES_ROUTE`/`WIDGET_NAVIGATES_EXTERNAL`, driven directly
/// by each widget's `routerLink`/`href` bindings (spec.md §4.8), not by
/// call-context evidence.
fn emit_widget_navigation_edges(
    widgets: &BTreeMap<String, Widget>,
    nav_index: &NavIndex,
    nodes: &mut Vec<Node>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    for w in widgets.values() {
        if let Some(router_link) = find_binding_or_attr(w, "routerlink") {
            let origin = find_binding_or_attr_origin(w, "routerlink").unwrap_or(&w.origin);
            let refs = vec![SourceRef::from(origin)];
            match nav_index.resolve(&router_link) {
                Some(route_id) => {
                    push_edge_full(
                        edges,
                        counters,
                        EdgeKind::WidgetNavigatesRoute,
                        &w.id,
                        Some(route_id),
                        refs,
                        ConstraintSurface::default(),
                        None,
                        Some(EdgeTrigger {
                            event: None,
                            via_router_link: Some(true),
                        }),
                        None,
                        Some(route_id.to_string()),
                        None,
                    );
                }
                None => {
                    push_edge_full(
                        edges,
                        counters,
                        EdgeKind::WidgetNavigatesRoute,
                        &w.id,
                        None,
                        refs,
                        ConstraintSurface::default(),
                        None,
                        Some(EdgeTrigger {
                            event: None,
                            via_router_link: Some(true),
                        }),
                        None,
                        None,
                        Some(router_link),
                    );
                }
            }
        }

        if let Some(href) = find_binding_or_attr(w, "href") {
            if navigation::is_absolute_external_url(&href) {
                let origin = find_binding_or_attr_origin(w, "href").unwrap_or(&w.origin);
                let external_id = fnv::external_node_id(&href);
                ensure_external_node(nodes, &external_id, &href, origin);
                push_edge_full(
                    edges,
                    counters,
                    EdgeKind::WidgetNavigatesExternal,
                    &w.id,
                    Some(&external_id),
                    vec![SourceRef::from(origin)],
                    ConstraintSurface::default(),
                    None,
                    Some(EdgeTrigger {
                        event: None,
                        via_router_link: Some(false),
                    }),
                    None,
                    None,
                    Some(href),
                );
            }
        }
    }
}

fn emit_widget_event_edges(
    inputs: &GraphInputs,
    nav_index: &NavIndex,
    nodes: &mut Vec<Node>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    let mut service_by_name: BTreeMap<&str, &str> = BTreeMap::new();
    for s in inputs.services.values() {
        service_by_name.insert(s.name.as_str(), s.id.as_str());
    }

    for event in inputs.widget_events {
        let normalized_event = normalize_event_name(&event.event_type);

        let owner = handler_owner(inputs.widgets, &event.widget_id);
        let owner_to = (!owner.is_empty()).then(|| owner.as_str());

        if let (Some(name), Some(origin)) = (&event.handler_name, &event.handler_origin) {
            push_edge_full(
                edges,
                counters,
                EdgeKind::WidgetTriggersHandler,
                &event.widget_id,
                owner_to,
                vec![SourceRef::from(origin)],
                ConstraintSurface::default(),
                None,
                Some(EdgeTrigger {
                    event: Some(normalized_event.clone()),
                    via_router_link: None,
                }),
                Some(EdgeHandler {
                    component_id: owner.clone(),
                    method_name: name.clone(),
                }),
                None,
                None,
            );
        }

        let widget_kind = inputs.widgets.get(&event.widget_id).map(|w| w.kind);
        let is_submit_event = normalized_event == "submit" || normalized_event == "ngsubmit";
        if is_submit_event && widget_kind == Some(crate::model::WidgetKind::Form) {
            push_edge(
                edges,
                counters,
                EdgeKind::WidgetSubmitsForm,
                &event.widget_id,
                owner_to,
                Vec::new(),
                ConstraintSurface::default(),
            );
        }

        for call in &event.call_contexts {
            match call.tag {
                crate::model::CallContextTag::Navigate => {
                    let Some(route_target) = call.target.route.as_deref() else {
                        continue;
                    };
                    let component_id = handler_owner(inputs.widgets, &event.widget_id);
                    if component_id.is_empty() {
                        continue;
                    }
                    if let Some(route_id) = nav_index.resolve(route_target) {
                        push_edge_full(
                            edges,
                            counters,
                            EdgeKind::ComponentNavigatesRoute,
                            &component_id,
                            Some(route_id),
                            vec![SourceRef::from(&call.origin)],
                            ConstraintSurface::default(),
                            None,
                            None,
                            None,
                            Some(route_id.to_string()),
                            None,
                        );
                    }
                    // Unresolved targets (including `window.*` navigation)
                    // are dropped: COMPONENT_NAVIGATES_ROUTE only models
                    // resolved in-app navigation, with no external fallback.
                }
                crate::model::CallContextTag::ServiceCall => {
                    if let Some(method) = &call.target.service_method {
                        let component_id = handler_owner(inputs.widgets, &event.widget_id);
                        if component_id.is_empty() {
                            continue;
                        }
                        match resolve_service_from_path(method, &service_by_name) {
                            Some(service_id) => {
                                push_edge(
                                    edges,
                                    counters,
                                    EdgeKind::ComponentCallsService,
                                    &component_id,
                                    Some(service_id),
                                    vec![SourceRef::from(&call.origin)],
                                    ConstraintSurface::default(),
                                );
                            }
                            None => {
                                // Unresolvable service target: self-loop so
                                // the evidence isn't silently dropped.
                                push_edge_full(
                                    edges,
                                    counters,
                                    EdgeKind::ComponentCallsService,
                                    &component_id,
                                    Some(&component_id),
                                    vec![SourceRef::from(&call.origin)],
                                    ConstraintSurface::default(),
                                    None,
                                    None,
                                    None,
                                    None,
                                    Some(method.clone()),
                                );
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let _ = nodes;
}

fn handler_owner(widgets: &BTreeMap<String, Widget>, widget_id: &str) -> String {
    widgets
        .get(widget_id)
        .map(|w| w.component_id.clone())
        .unwrap_or_default()
}

/// Resolves a `this.someService.method` call-context path to a `Service`
/// node via a case-insensitive match on the leading identifier's
/// capitalized form (spec.md §4.6 "service call resolution").
fn resolve_service_from_path<'a>(method_path: &str, by_name: &BTreeMap<&str, &'a str>) -> Option<&'a str> {
    let field = method_path.trim_start_matches("this.").split('.').next()?;
    by_name
        .iter()
        .find(|(name, _)| name.to_lowercase() == field.to_lowercase())
        .map(|(_, id)| *id)
}

fn ensure_external_node(nodes: &mut Vec<Node>, id: &str, label: &str, origin: &crate::model::Origin) {
    if let Some(existing) = nodes.iter_mut().find(|n| n.id == id) {
        existing.refs.push(SourceRef::from(origin));
        return;
    }
    nodes.push(Node {
        id: id.to_string(),
        kind: NodeKind::External,
        label: label.to_string(),
        refs: vec![SourceRef::from(origin)],
        metadata: serde_json::json!({}),
    });
}

fn emit_route_redirect_edges(
    routes: &BTreeMap<String, Route>,
    guard_summaries: &BTreeMap<String, ConstraintSummary>,
    edges: &mut Vec<Edge>,
    counters: &mut BTreeMap<(String, &'static str), u32>,
) {
    let mut by_full_path: BTreeMap<&str, &Route> = BTreeMap::new();
    for r in routes.values() {
        by_full_path.insert(r.full_path(), r);
    }
    for r in routes.values() {
        if let Route::RedirectRoute {
            common,
            redirect_to_full_path,
            ..
        } = r
        {
            if let Some(target) = by_full_path.get(redirect_to_full_path.as_str()) {
                let constraints = constraint_surface_for_route(target, guard_summaries);
                push_edge_full(
                    edges,
                    counters,
                    EdgeKind::RouteRedirectsToRoute,
                    &common.id,
                    Some(target.id()),
                    vec![SourceRef::from(&common.origin)],
                    constraints,
                    Some(true),
                    None,
                    None,
                    None,
                    None,
                );
            }
        }
    }
}

pub fn compute_stats(graph: &Multigraph) -> crate::model::Stats {
    let structural_edge_count = graph.edges.iter().filter(|e| e.kind.is_structural()).count();
    crate::model::Stats {
        node_count: graph.nodes.len(),
        edge_count: graph.edges.len(),
        structural_edge_count,
        executable_edge_count: graph.edges.len() - structural_edge_count,
    }
}
