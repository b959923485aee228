//! Module Extractor (spec.md §4.4): a two-pass scan over `@NgModule`-
//! decorated classes — first collecting every module's own metadata,
//! then classifying its role from the project-wide import graph.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use oxc_ast::ast as oxc;
use oxc_span::GetSpan;
use regex::Regex;

use crate::ast::{access, Project, SourceFile};
use crate::model::{Module, ModuleRole, Origin};

static ROOT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^App(Root)?Module$").unwrap());
static SHARED_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(Shared|Core|Common|Global)Module$").unwrap());
static DYNAMIC_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"import\(\s*['"]([^'"]+)['"]"#).unwrap());

/// Pass 1 + initial structural classification (Root/GlobalShared/
/// Feature/Unknown). `LazyFeature`/`DeadOrUnreachable` and
/// `owned_routes` are finalized by [`finalize_roles`] once routes are
/// known (spec.md §2 control-flow: modules precede routes).
pub fn extract_modules(project: &Project) -> BTreeMap<String, Module> {
    let mut modules = BTreeMap::new();

    for file in project.files() {
        for stmt in &file.program().body {
            if let Some(class) = class_decl(stmt) {
                if let Some(decorator) = access::find_decorator(class, "NgModule") {
                    if let Some(module) = build_module(file, class, decorator) {
                        modules.insert(module.id.clone(), module);
                    }
                }
            }
        }
    }

    classify_structural_roles(project, &mut modules);
    modules
}

fn class_decl<'a>(stmt: &'a oxc::Statement<'a>) -> Option<&'a oxc::Class<'a>> {
    match stmt {
        oxc::Statement::ClassDeclaration(c) => Some(c),
        oxc::Statement::ExportNamedDeclaration(e) => match &e.declaration {
            Some(oxc::Declaration::ClassDeclaration(c)) => Some(c),
            _ => None,
        },
        oxc::Statement::ExportDefaultDeclaration(e) => match &e.declaration {
            oxc::ExportDefaultDeclarationKind::ClassDeclaration(c) => Some(c),
            _ => None,
        },
        _ => None,
    }
}

fn build_module(
    file: &SourceFile,
    class: &oxc::Class,
    decorator: &oxc::Decorator,
) -> Option<Module> {
    let name = class.id.as_ref()?.name.to_string();
    let id = file.path.to_string_lossy().to_string();
    let span = class.span();
    let origin = Origin::new(&id, span.start, span.end, &file.text);

    let options = access::decorator_options(decorator);

    let array_prop = |key: &str| -> Vec<String> {
        options
            .and_then(|o| access::object_property(o, key))
            .map(access::extract_array_of_identifiers)
            .unwrap_or_default()
    };
    let origins_for = |names: &[String]| -> std::collections::BTreeMap<String, Origin> {
        names
            .iter()
            .map(|n| (n.clone(), origin.clone()))
            .collect()
    };

    let imports = array_prop("imports");
    let declarations = array_prop("declarations");
    let providers = array_prop("providers");
    let exports = array_prop("exports");
    let has_bootstrap = options
        .and_then(|o| access::object_property(o, "bootstrap"))
        .map(|e| !access::extract_array_of_identifiers(e).is_empty())
        .unwrap_or(false);

    Some(Module {
        id,
        name,
        role: if has_bootstrap { ModuleRole::Root } else { ModuleRole::Unknown },
        import_origins: origins_for(&imports),
        export_origins: origins_for(&exports),
        imports,
        declarations,
        providers,
        exports,
        owned_routes: Vec::new(),
        has_bootstrap,
        origin,
    })
}

/// Classifies `Root` (bootstrap, or a class name matching
/// `/^App(Root)?Module$/i`), `GlobalShared` (name matching
/// `/^(Shared|Core|Common|Global)Module$/i`), `Feature` (non-empty
/// declarations, imported by some other module) and `DeadOrUnreachable`
/// (non-empty declarations, no importer). `LazyFeature` is only decided
/// in [`finalize_roles`], once the project-wide dynamic-import scan and
/// route extraction have both run.
fn classify_structural_roles(project: &Project, modules: &mut BTreeMap<String, Module>) {
    let mut importer_count: BTreeMap<String, u32> = BTreeMap::new();

    let ids: Vec<String> = modules.keys().cloned().collect();
    for id in &ids {
        let Some(file) = project.get(id) else { continue };
        let import_names = modules[id].imports.clone();
        for name in import_names {
            if let Some(target_id) = resolve_module_reference(project, file, &name, modules) {
                if &target_id != id {
                    *importer_count.entry(target_id).or_insert(0) += 1;
                }
            }
        }
    }

    for (id, module) in modules.iter_mut() {
        if module.has_bootstrap || ROOT_NAME.is_match(&module.name) {
            module.role = ModuleRole::Root;
        } else if SHARED_NAME.is_match(&module.name) {
            module.role = ModuleRole::GlobalShared;
        } else if !module.declarations.is_empty() && importer_count.get(id).copied().unwrap_or(0) > 0 {
            module.role = ModuleRole::Feature;
        } else if !module.declarations.is_empty() {
            module.role = ModuleRole::DeadOrUnreachable;
        } else {
            module.role = ModuleRole::Unknown;
        }
    }
}

/// Every target resolved from a project-wide `import('…')` expression,
/// found via a bounded text scan (the same source-proximity heuristic
/// the guard summarizer and route discovery use elsewhere).
fn scan_dynamic_import_targets(project: &Project) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for file in project.files() {
        let path = file.path.to_string_lossy().to_string();
        for cap in DYNAMIC_IMPORT.captures_iter(&file.text) {
            if let Some(target) = access::resolve_import_target(project, &path, &cap[1]) {
                out.insert(target);
            }
        }
    }
    out
}

fn resolve_module_reference(
    project: &Project,
    from_file: &SourceFile,
    name: &str,
    modules: &BTreeMap<String, Module>,
) -> Option<String> {
    let specifier = access::find_import_specifier(from_file, name)?;
    let target = access::resolve_import_target(project, &from_file.path.to_string_lossy(), &specifier)?;
    modules.contains_key(&target).then_some(target)
}

/// Second pass, run by the orchestrator once routes are extracted
/// (spec.md §5 "owned-routes list"): attaches each route to the module
/// whose source file declared it, then reclassifies any module that is
/// the resolved target of an `import('…')` expression anywhere in the
/// project as `LazyFeature` (unless it was already `Root`/`GlobalShared`).
pub fn finalize_roles(project: &Project, modules: &mut BTreeMap<String, Module>, routes: &crate::routes::RouteMap) {
    for route in routes.routes.values() {
        if let Some(module) = modules.get_mut(&route.common().module_source_file) {
            module.owned_routes.push(route.id().to_string());
        }
    }

    let lazy_targets = scan_dynamic_import_targets(project);

    for module in modules.values_mut() {
        module.owned_routes.sort();
        module.owned_routes.dedup();
        if matches!(module.role, ModuleRole::Root | ModuleRole::GlobalShared) {
            continue;
        }
        if lazy_targets.contains(&module.id) || routes.lazily_reached_files.contains(&module.id) {
            module.role = ModuleRole::LazyFeature;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_modules_on_empty_project_map() {
        let modules: BTreeMap<String, Module> = BTreeMap::new();
        assert!(modules.is_empty());
    }
}
