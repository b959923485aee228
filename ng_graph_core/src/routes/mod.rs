//! Route Extractor (spec.md §4.3): discovers route-array literals,
//! parses each route object, normalizes full paths, recurses into lazy
//! `loadChildren` targets, deduplicates, and resolves component ids.

mod component_index;
mod discovery;
mod parse_object;

pub use component_index::ComponentIndex;
pub use discovery::extract_first_quoted_specifier;

use std::collections::{BTreeMap, BTreeSet};

use oxc_span::GetSpan;

use crate::ast::{access, Project, SourceFile};
use crate::logging::Logger;
use crate::model::{Component, Origin, PathMatch, Route, RouteCommon, RouteParams, extract_route_params};

const UNKNOWN_COMPONENT: &str = "__unknown__";

#[derive(Debug, Default)]
pub struct RouteMap {
    pub routes: BTreeMap<String, Route>,
    /// File paths reached only through a `loadChildren` recursion, used
    /// by the module extractor's second pass to classify `LazyFeature`
    /// modules (spec.md §4.4).
    pub lazily_reached_files: BTreeSet<String>,
}

/// Reverse index of `Component.id -> [Route.id]` (spec.md §4.3 "Output").
#[derive(Debug, Default)]
pub struct ComponentRouteMap {
    pub map: BTreeMap<String, Vec<String>>,
}

pub fn extract_routes(
    project: &Project,
    components: &[Component],
    logger: &dyn Logger,
) -> (RouteMap, ComponentRouteMap) {
    let index = ComponentIndex::build(components);
    let literals = discovery::discover_route_arrays(project);

    // Array literals reached transitively via some other literal's
    // `loadChildren` are walked only through `recurse_lazy`, where they
    // get the right parent id/fullPath. Without this, the top-level loop
    // below (which iterates literals in plain file order, not import/
    // reachability order) can reach a lazy feature's own `routes` array
    // first and claim it with `parentFullPath = ""`, after which the
    // real recursive walk silently no-ops on the seen-record-origins
    // guard and the feature's routes are never correctly nested.
    let lazy_target_origins = discover_lazy_target_origins(project, &literals);

    let mut by_key: BTreeMap<(String, String), Route> = BTreeMap::new();
    let mut seen_record_origins: BTreeSet<String> = BTreeSet::new();
    let mut visited_files: BTreeSet<String> = BTreeSet::new();
    let mut lazy_files: BTreeSet<String> = BTreeSet::new();

    for literal in &literals {
        let Some(file) = project.get(&literal.file) else {
            continue;
        };
        if lazy_target_origins.contains(&record_origin_key(&literal.file, literal.start_offset, file)) {
            continue;
        }
        walk_array(
            project,
            file,
            literal.array,
            None,
            "",
            &index,
            &mut by_key,
            &mut seen_record_origins,
            &mut visited_files,
            &mut lazy_files,
            logger,
        );
    }

    let mut by_path: BTreeMap<String, Vec<Route>> = BTreeMap::new();
    for route in by_key.into_values() {
        by_path.entry(route.full_path().to_string()).or_default().push(route);
    }

    let mut routes: BTreeMap<String, Route> = BTreeMap::new();
    for members in by_path.into_values() {
        let canonical = merge_route_group(members);
        routes.insert(canonical.id().to_string(), canonical);
    }

    let mut component_map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for route in routes.values() {
        if let Some(cid) = route.resolved_component_id() {
            component_map
                .entry(cid.to_string())
                .or_default()
                .push(route.id().to_string());
        }
    }
    for ids in component_map.values_mut() {
        ids.sort();
        ids.dedup();
    }

    (
        RouteMap {
            routes,
            lazily_reached_files: lazy_files,
        },
        ComponentRouteMap { map: component_map },
    )
}

#[allow(clippy::too_many_arguments)]
fn walk_array<'a>(
    project: &Project,
    file: &SourceFile,
    array: &'a oxc_ast::ast::ArrayExpression<'a>,
    parent_id: Option<&str>,
    parent_full_path: &str,
    index: &ComponentIndex,
    out: &mut BTreeMap<(String, String), Route>,
    seen_record_origins: &mut BTreeSet<String>,
    visited_files: &mut BTreeSet<String>,
    lazy_files: &mut BTreeSet<String>,
    logger: &dyn Logger,
) {
    let origin_key = record_origin_key(&file.path.to_string_lossy(), array.span().start, file);
    if !seen_record_origins.insert(origin_key) {
        return;
    }

    for el in &array.elements {
        let Some(expr) = el.as_expression() else { continue };
        let oxc_ast::ast::Expression::ObjectExpression(obj) = expr else {
            continue;
        };
        let fields = parse_object::parse_route_object(obj, &file.path.to_string_lossy(), &file.text);
        let full_path = build_full_path(parent_full_path, &fields.raw_path);
        let module_source_file = file.path.to_string_lossy().to_string();
        let id = Route::compute_route_id(&full_path, &module_source_file);
        let (start, end) = (fields.span.0, fields.span.1);
        let origin = Origin::new(&module_source_file, start, end, &file.text);

        let common = RouteCommon {
            id: id.clone(),
            raw_path: fields.raw_path.clone(),
            full_path: full_path.clone(),
            module_source_file: module_source_file.clone(),
            parent_id: parent_id.map(|s| s.to_string()),
            child_ids: Vec::new(),
            outlet: fields.outlet.clone(),
            guards: fields.guards.clone(),
            resolvers: fields.resolvers.clone(),
            data: fields.data.clone(),
            params: RouteParams {
                route_params: extract_route_params(&full_path),
            },
            origin,
        };

        let route = if fields.raw_path == "**" {
            let component_id = fields
                .component_ident
                .as_ref()
                .or(fields.load_component_ident.as_ref())
                .and_then(|name| index.resolve(project, file, name));
            Route::WildcardRoute { common, component_id }
        } else if let Some(redirect_to) = &fields.redirect_to {
            let redirect_to_full_path = normalize_redirect_target(&full_path, redirect_to);
            Route::RedirectRoute {
                common,
                redirect_to: redirect_to.clone(),
                redirect_to_full_path,
                path_match: fields.path_match,
            }
        } else {
            let component_id = fields
                .component_ident
                .as_ref()
                .or(fields.load_component_ident.as_ref())
                .and_then(|name| index.resolve(project, file, name))
                .unwrap_or_else(|| UNKNOWN_COMPONENT.to_string());
            Route::ComponentRoute { common, component_id }
        };

        let mut child_ids = Vec::new();
        if let Some(children) = fields.children {
            child_ids = collect_child_ids(children, &full_path, &module_source_file);
            walk_array(
                project,
                file,
                children,
                Some(&id),
                &full_path,
                index,
                out,
                seen_record_origins,
                visited_files,
                lazy_files,
                logger,
            );
        }
        if !child_ids.is_empty() {
            let mut r = route;
            r.common_mut().child_ids = child_ids;
            out.insert((full_path.clone(), module_source_file.clone()), r);
        } else {
            out.insert((full_path.clone(), module_source_file.clone()), route);
        }

        if let Some(specifier) = &fields.load_children_specifier {
            recurse_lazy(
                project,
                file,
                specifier,
                &id,
                &full_path,
                index,
                out,
                seen_record_origins,
                visited_files,
                lazy_files,
                logger,
            );
        }
    }
}

fn collect_child_ids<'a>(
    children: &'a oxc_ast::ast::ArrayExpression<'a>,
    parent_full_path: &str,
    module_source_file: &str,
) -> Vec<String> {
    let mut ids = Vec::new();
    for el in &children.elements {
        let Some(expr) = el.as_expression() else { continue };
        let oxc_ast::ast::Expression::ObjectExpression(obj) = expr else {
            continue;
        };
        if let Some(raw_path) = access::object_property(obj, "path").and_then(access::get_string_literal_value) {
            let full_path = build_full_path(parent_full_path, &raw_path);
            ids.push(Route::compute_route_id(&full_path, module_source_file));
        }
    }
    ids.sort();
    ids
}

#[allow(clippy::too_many_arguments)]
fn recurse_lazy(
    project: &Project,
    from_file: &SourceFile,
    specifier: &str,
    parent_id: &str,
    parent_full_path: &str,
    index: &ComponentIndex,
    out: &mut BTreeMap<(String, String), Route>,
    seen_record_origins: &mut BTreeSet<String>,
    visited_files: &mut BTreeSet<String>,
    lazy_files: &mut BTreeSet<String>,
    logger: &dyn Logger,
) {
    let target = access::resolve_import_target(project, &from_file.path.to_string_lossy(), specifier)
        .and_then(|p| project.get(&p))
        .or_else(|| project.find_by_specifier_substring(specifier));

    let Some(target_file) = target else {
        logger.warn(&format!(
            "route extractor: unresolved loadChildren specifier '{specifier}' from {}",
            from_file.path.display()
        ));
        return;
    };

    // Guards only against cycles in the loadChildren graph (module A
    // lazy-loading module B lazy-loading module A); double-processing the
    // same array literal is guarded separately by `seen_record_origins`,
    // keyed by span rather than file, since a file can hold more than one
    // route-array literal.
    let key = target_file.path.to_string_lossy().to_string();
    if !visited_files.insert(key.clone()) {
        return;
    }
    lazy_files.insert(key);

    for stmt in &target_file.program().body {
        if let Some(array) = top_level_routes_array(stmt) {
            walk_array(
                project,
                target_file,
                array,
                Some(parent_id),
                parent_full_path,
                index,
                out,
                seen_record_origins,
                visited_files,
                lazy_files,
                logger,
            );
        }
    }
}

/// `"<file>::<line>::<col>"` identity of an array literal's opening
/// brace, used to guard against walking the same route-array literal
/// twice regardless of which discovery path (top-level scan vs. lazy
/// recursion) reaches it.
fn record_origin_key(file: &str, start_offset: u32, source_file: &SourceFile) -> String {
    let point = Origin::new(file, start_offset, start_offset, &source_file.text);
    format!("{file}::{}::{}", point.start_line, point.start_col)
}

/// Recursively collects every `loadChildren` specifier reachable from an
/// array literal (including inline `children` arrays), paired with the
/// file it was read from.
fn collect_load_children_specifiers<'a>(
    array: &'a oxc_ast::ast::ArrayExpression<'a>,
    file: &SourceFile,
    out: &mut Vec<(String, String)>,
) {
    for el in &array.elements {
        let Some(expr) = el.as_expression() else { continue };
        let oxc_ast::ast::Expression::ObjectExpression(obj) = expr else {
            continue;
        };
        let fields = parse_object::parse_route_object(obj, &file.path.to_string_lossy(), &file.text);
        if let Some(specifier) = &fields.load_children_specifier {
            out.push((file.path.to_string_lossy().to_string(), specifier.clone()));
        }
        if let Some(children) = fields.children {
            collect_load_children_specifiers(children, file, out);
        }
    }
}

/// Pre-scans every discovered literal (transitively, following
/// `loadChildren` chains) for the array-literal origins that will only
/// ever be reached correctly through `recurse_lazy`'s parent context, so
/// the top-level discovery loop can skip claiming them itself.
fn discover_lazy_target_origins(project: &Project, literals: &[discovery::RouteLiteral]) -> BTreeSet<String> {
    let mut pending: Vec<(String, String)> = Vec::new();
    for literal in literals {
        if let Some(file) = project.get(&literal.file) {
            collect_load_children_specifiers(literal.array, file, &mut pending);
        }
    }

    let mut targets = BTreeSet::new();
    let mut visited_targets: BTreeSet<String> = BTreeSet::new();
    let mut queue: std::collections::VecDeque<(String, String)> = pending.into();

    while let Some((from_file, specifier)) = queue.pop_front() {
        let target_file = access::resolve_import_target(project, &from_file, &specifier)
            .and_then(|p| project.get(&p))
            .or_else(|| project.find_by_specifier_substring(&specifier));
        let Some(target_file) = target_file else { continue };

        let key = target_file.path.to_string_lossy().to_string();
        if !visited_targets.insert(key.clone()) {
            continue;
        }

        for stmt in &target_file.program().body {
            if let Some(array) = top_level_routes_array(stmt) {
                targets.insert(record_origin_key(&key, array.span().start, target_file));
                let mut nested = Vec::new();
                collect_load_children_specifiers(array, target_file, &mut nested);
                queue.extend(nested);
            }
        }
    }

    targets
}

/// Merges every route sharing a `fullPath` into one canonical
/// representative (spec.md §4.3 "Deduplication and canonical
/// selection"): highest `resolution_score` wins, ties broken by the
/// smaller route id; guards are unioned and deduplicated by
/// `(kind, guardName)` then sorted by guard name, and child-id lists are
/// unioned and sorted.
fn merge_route_group(mut members: Vec<Route>) -> Route {
    let mut canonical_idx = 0usize;
    for i in 1..members.len() {
        let better_score = members[i].resolution_score() > members[canonical_idx].resolution_score();
        let tied_smaller_id = members[i].resolution_score() == members[canonical_idx].resolution_score()
            && members[i].id() < members[canonical_idx].id();
        if better_score || tied_smaller_id {
            canonical_idx = i;
        }
    }
    let mut canonical = members.swap_remove(canonical_idx);

    let mut guards = canonical.common().guards.clone();
    let mut child_ids = canonical.common().child_ids.clone();
    for other in &members {
        guards.extend(other.common().guards.iter().cloned());
        child_ids.extend(other.common().child_ids.iter().cloned());
    }
    guards.sort_by(|a, b| a.guard_name.cmp(&b.guard_name));
    guards.dedup_by(|a, b| a.kind == b.kind && a.guard_name == b.guard_name);
    child_ids.sort();
    child_ids.dedup();

    let common = canonical.common_mut();
    common.guards = guards;
    common.child_ids = child_ids;

    canonical
}

fn top_level_routes_array<'a>(
    stmt: &'a oxc_ast::ast::Statement<'a>,
) -> Option<&'a oxc_ast::ast::ArrayExpression<'a>> {
    use oxc_ast::ast as oxc;
    let decl = match stmt {
        oxc::Statement::VariableDeclaration(d) => Some(d.as_ref()),
        oxc::Statement::ExportNamedDeclaration(e) => match &e.declaration {
            Some(oxc::Declaration::VariableDeclaration(d)) => Some(d.as_ref()),
            _ => None,
        },
        _ => None,
    }?;
    for declarator in &decl.declarations {
        if let oxc::BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind {
            if id.name == "routes" {
                if let Some(oxc::Expression::ArrayExpression(arr)) = &declarator.init {
                    return Some(arr);
                }
            }
        }
    }
    None
}

/// `buildFullPath`: joins a parent path and a route's own `path`,
/// collapsing duplicate slashes and stripping a leading/trailing slash
/// from segments. Always `/`-prefixed, never trailing-slashed except
/// for the lone root (spec.md GLOSSARY "fullPath").
fn build_full_path(parent: &str, own: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for seg in parent.split('/').filter(|s| !s.is_empty()) {
        segments.push(seg);
    }
    for seg in own.split('/').filter(|s| !s.is_empty()) {
        segments.push(seg);
    }
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// `normalizeRedirectTarget`: a `redirectTo` that starts with `/` is
/// treated as already-absolute; otherwise it's resolved relative to the
/// redirecting route's own full path (its parent segment).
fn normalize_redirect_target(full_path: &str, redirect_to: &str) -> String {
    if redirect_to.starts_with('/') {
        return build_full_path("", redirect_to);
    }
    let parent = match full_path.rfind('/') {
        Some(idx) => &full_path[..idx],
        None => "",
    };
    build_full_path(parent, redirect_to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_full_path_joins_and_collapses_slashes() {
        assert_eq!(build_full_path("admin", "/users/"), "/admin/users");
        assert_eq!(build_full_path("", ""), "/");
        assert_eq!(build_full_path("a", ""), "/a");
    }

    #[test]
    fn normalize_redirect_target_absolute_vs_relative() {
        assert_eq!(normalize_redirect_target("/a/b", "/x/y"), "/x/y");
        assert_eq!(normalize_redirect_target("/a/b", "c"), "/a/c");
    }
}
