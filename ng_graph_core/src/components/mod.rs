//! Component + Template Pipeline (spec.md §4.5): `@Component`-decorated
//! class metadata, sandboxed `templateUrl` resolution, template parsing
//! via the adapter, widget classification (§4.5.1) and predicate
//! attachment (§4.5.2).

mod predicates;
mod widgets;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use oxc_ast::ast as oxc;
use oxc_span::GetSpan;

use crate::ast::{access, Project, SourceFile};
use crate::logging::Logger;
use crate::model::{Component, Origin, TemplateSource, Widget};
use crate::template;

pub struct ComponentExtraction {
    pub components: BTreeMap<String, Component>,
    pub widgets: BTreeMap<String, Widget>,
    /// `(parent_widget_id, child_widget_id)` nesting pairs (spec.md §4.8
    /// `WIDGET_COMPOSES_WIDGET`).
    pub widget_composition: Vec<(String, String)>,
}

pub fn extract_components(project: &Project, logger: &dyn Logger) -> ComponentExtraction {
    let mut components = BTreeMap::new();
    let mut widgets = BTreeMap::new();
    let mut widget_composition = Vec::new();

    for file in project.files() {
        for stmt in &file.program().body {
            if let Some(class) = class_decl(stmt) {
                if let Some(decorator) = access::find_decorator(class, "Component") {
                    if let Some((component, own_widgets, own_composes)) =
                        build_component(project, file, class, decorator, logger)
                    {
                        widgets.extend(own_widgets.into_iter().map(|w| (w.id.clone(), w)));
                        widget_composition.extend(own_composes);
                        components.insert(component.id.clone(), component);
                    }
                }
            }
        }
    }

    attach_declaring_modules(project, &mut components);

    ComponentExtraction {
        components,
        widgets,
        widget_composition,
    }
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

fn build_component(
    project: &Project,
    file: &SourceFile,
    class: &oxc::Class,
    decorator: &oxc::Decorator,
    logger: &dyn Logger,
) -> Option<(Component, Vec<Widget>, Vec<(String, String)>)> {
    let name = class.id.as_ref()?.name.to_string();
    let file_path = file.path.to_string_lossy().to_string();
    let id = format!("{}#{}", file_path, name);
    let span = class.span();
    let origin = Origin::new(&file_path, span.start, span.end, &file.text);

    let options = access::decorator_options(decorator)?;
    // Selector invariant (spec.md §4.5): a component with an absent or
    // blank selector is skipped entirely rather than producing a node
    // that can silently mis-link to unrelated nested-component usages.
    let selector = access::object_property(options, "selector").and_then(access::get_string_literal_value);
    let selector = match selector {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            logger.warn(&format!("component {id}: missing or blank selector, skipping"));
            return None;
        }
    };

    let (template_source, template_text, template_origin) =
        resolve_template(project, file, &file_path, options, &origin);

    let nodes = template::parse(&template_text);
    let mut widgets = Vec::new();
    let mut stable_index: u32 = 0;
    let mut composes = Vec::new();
    widgets::collect_widgets(
        &id,
        &template_origin.file,
        &nodes,
        &template_text,
        &mut stable_index,
        &mut widgets,
        &mut composes,
    );
    predicates::attach_predicates(&nodes, &template_text, &mut widgets);

    if widgets.is_empty() && !template_text.is_empty() {
        logger.debug(&format!("component {id}: no widgets discovered in its template"));
    }

    let widget_ids = widgets.iter().map(|w| w.id.clone()).collect();
    let nested_component_selectors = nodes
        .iter()
        .flat_map(widgets::all_element_tag_names)
        .collect::<Vec<_>>();

    Some((
        Component {
            id,
            name,
            file: file_path,
            selector,
            template_source,
            template_origin,
            widget_ids,
            nested_component_selectors,
            declaring_modules: Vec::new(),
            origin,
        },
        widgets,
        composes,
    ))
}

/// Resolves `template`/`templateUrl`, sandboxed to the project root
/// (spec.md §4.5 "templateUrl resolution is sandboxed to the project
/// root; any path that escapes it is treated as unresolved").
fn resolve_template(
    project: &Project,
    file: &SourceFile,
    file_path: &str,
    options: &oxc::ObjectExpression,
    origin: &Origin,
) -> (TemplateSource, String, Origin) {
    if let Some(inline) = access::object_property(options, "template").and_then(access::get_string_literal_value) {
        return (TemplateSource::Inline, inline, origin.clone());
    }

    if let Some(url) = access::object_property(options, "templateUrl").and_then(access::get_string_literal_value) {
        let base = Path::new(file_path).parent().unwrap_or(Path::new("."));
        let candidate: PathBuf = base.join(&url);
        if is_within_root(&project.root, &candidate) {
            if let Ok(text) = std::fs::read_to_string(&candidate) {
                let resolved = candidate.to_string_lossy().to_string();
                return (
                    TemplateSource::Url(url),
                    text.clone(),
                    Origin::new(resolved, 0, text.len() as u32, &text),
                );
            }
        }
        return (TemplateSource::Url(url), String::new(), origin.clone());
    }

    let _ = file;
    (TemplateSource::Inline, String::new(), origin.clone())
}

fn is_within_root(root: &Path, candidate: &Path) -> bool {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let resolved = candidate
        .canonicalize()
        .unwrap_or_else(|_| candidate.to_path_buf());
    resolved.starts_with(&root)
}

/// Back-fills `Component.declaring_modules` from every `Module.declarations`
/// array that names this component's class (matched by import resolution,
/// same as route/component resolution elsewhere).
fn attach_declaring_modules(project: &Project, components: &mut BTreeMap<String, Component>) {
    let mut by_file_and_name: BTreeMap<(String, String), String> = BTreeMap::new();
    for c in components.values() {
        by_file_and_name.insert((c.file.clone(), c.name.clone()), c.id.clone());
    }

    for file in project.files() {
        for stmt in &file.program().body {
            let Some(class) = class_decl(stmt) else { continue };
            let Some(decorator) = access::find_decorator(class, "NgModule") else {
                continue;
            };
            let Some(options) = access::decorator_options(decorator) else {
                continue;
            };
            let Some(decls) = access::object_property(options, "declarations") else {
                continue;
            };
            let module_id = file.path.to_string_lossy().to_string();
            for name in access::extract_array_of_identifiers(decls) {
                let resolved_id = by_file_and_name.get(&(file.path.to_string_lossy().to_string(), name.clone()))
                    .cloned()
                    .or_else(|| {
                        let specifier = access::find_import_specifier(file, &name)?;
                        let target = access::resolve_import_target(project, &module_id, &specifier)?;
                        by_file_and_name.get(&(target, name.clone())).cloned()
                    });
                if let Some(cid) = resolved_id {
                    if let Some(component) = components.get_mut(&cid) {
                        component.declaring_modules.push(module_id.clone());
                    }
                }
            }
        }
    }

    for c in components.values_mut() {
        c.declaring_modules.sort();
        c.declaring_modules.dedup();
    }
}
