//! Widget classification (spec.md §4.5.1): walks the uniform template
//! tree and emits one [`Widget`] per interactive element, classifying
//! its [`WidgetKind`] from tag name and surface attributes.

use std::collections::BTreeMap;

use crate::model::{BindingKind, Origin, Validators, Widget, WidgetBinding, WidgetKind};
use crate::template::{TemplateNode, TemplateNodeKind};

const INTERACTIVE_TAGS: &[&str] = &[
    "button", "a", "input", "select", "textarea", "form", "mat-menu-item", "p-menuitem",
];

const MATERIAL_DIRECTIVE_ATTRS: &[&str] = &[
    "mat-button",
    "mat-raised-button",
    "mat-icon-button",
    "matbutton",
    "mat-menu-item",
];

/// Returns the flat widget list plus the nearest-ancestor `(parent_id,
/// child_id)` widget-nesting pairs, consumed by the graph builder for
/// `WIDGET_COMPOSES_WIDGET` edges (spec.md §4.8).
pub fn collect_widgets(
    component_id: &str,
    template_file: &str,
    nodes: &[TemplateNode],
    template_text: &str,
    stable_index: &mut u32,
    out: &mut Vec<Widget>,
    composes: &mut Vec<(String, String)>,
) {
    collect_widgets_inner(
        component_id,
        template_file,
        nodes,
        template_text,
        stable_index,
        out,
        None,
        composes,
    );
}

#[allow(clippy::too_many_arguments)]
fn collect_widgets_inner(
    component_id: &str,
    template_file: &str,
    nodes: &[TemplateNode],
    template_text: &str,
    stable_index: &mut u32,
    out: &mut Vec<Widget>,
    ancestor_widget_id: Option<String>,
    composes: &mut Vec<(String, String)>,
) {
    for node in nodes {
        let mut this_widget_id = ancestor_widget_id.clone();
        if node.kind == TemplateNodeKind::Element {
            if let Some(name) = &node.name {
                if is_widget_candidate(name, node) {
                    let widget = build_widget(component_id, template_file, node, template_text, *stable_index);
                    let id = widget.id.clone();
                    if let Some(parent) = &ancestor_widget_id {
                        composes.push((parent.clone(), id.clone()));
                    }
                    out.push(widget);
                    *stable_index += 1;
                    this_widget_id = Some(id);
                }
            }
        }
        collect_widgets_inner(
            component_id,
            template_file,
            &node.children,
            template_text,
            stable_index,
            out,
            this_widget_id,
            composes,
        );
    }
}

fn is_widget_candidate(tag: &str, node: &TemplateNode) -> bool {
    let lower = tag.to_lowercase();
    INTERACTIVE_TAGS.contains(&lower.as_str()) || has_material_directive(node) || has_nav_binding(node)
}

fn has_material_directive(node: &TemplateNode) -> bool {
    node.attributes.iter().any(|a| {
        a.name
            .as_deref()
            .map(|n| MATERIAL_DIRECTIVE_ATTRS.contains(&n.to_lowercase().as_str()))
            .unwrap_or(false)
    })
}

fn has_nav_binding(node: &TemplateNode) -> bool {
    node.attributes.iter().any(|a| {
        matches!(
            a.name.as_deref().map(|n| n.to_lowercase()).as_deref(),
            Some("routerlink") | Some("href")
        )
    })
}

fn build_widget(
    component_id: &str,
    template_file: &str,
    node: &TemplateNode,
    template_text: &str,
    stable_index: u32,
) -> Widget {
    let tag = node.name.clone().unwrap_or_default();
    let kind = classify_kind(&tag, node);
    let span = node.span.unwrap_or(crate::template::Span { start: 0, end: 0 });
    let origin = Origin::new(template_file, span.start, span.end, template_text);

    let mut attributes: BTreeMap<String, String> = BTreeMap::new();
    let mut bindings = Vec::new();
    for attr in &node.attributes {
        let attr_name = attr.name.clone().unwrap_or_default();
        let attr_value = attr.value.clone().unwrap_or_default();
        let attr_span = attr.span.unwrap_or(span);
        let attr_origin = Origin::new(template_file, attr_span.start, attr_span.end, template_text);
        match attr.kind {
            TemplateNodeKind::Attr => {
                attributes.insert(attr_name, attr_value);
            }
            TemplateNodeKind::BoundAttr => bindings.push(WidgetBinding {
                kind: BindingKind::BoundAttribute,
                name: attr_name,
                value: attr_value,
                origin: attr_origin,
            }),
            TemplateNodeKind::Event => bindings.push(WidgetBinding {
                kind: BindingKind::Event,
                name: attr_name,
                value: attr_value,
                origin: attr_origin,
            }),
            _ => {}
        }
    }

    let text_label = first_text_descendant(node);
    let validators = extract_validators(&attributes);

    Widget {
        id: Widget::make_id(
            component_id,
            template_file,
            origin.start_line,
            origin.start_col,
            kind,
            stable_index,
        ),
        component_id: component_id.to_string(),
        kind,
        tag,
        stable_index,
        path: template_file.to_string(),
        attributes,
        bindings,
        text_label,
        validators,
        visibility_predicates: Vec::new(),
        enablement_predicates: Vec::new(),
        origin,
        predicate_containment_proven: false,
    }
}

fn classify_kind(tag: &str, node: &TemplateNode) -> WidgetKind {
    match tag.to_lowercase().as_str() {
        "button" => WidgetKind::Button,
        "a" => WidgetKind::Link,
        "select" => WidgetKind::Select,
        "textarea" => WidgetKind::Textarea,
        "form" => WidgetKind::Form,
        "input" => classify_input(node),
        "mat-menu-item" | "p-menuitem" => WidgetKind::MenuItem,
        _ => {
            if has_nav_binding(node) {
                WidgetKind::Link
            } else if has_material_directive(node) {
                WidgetKind::Button
            } else {
                WidgetKind::Unknown
            }
        }
    }
}

fn classify_input(node: &TemplateNode) -> WidgetKind {
    let input_type = node
        .attributes
        .iter()
        .find(|a| a.name.as_deref() == Some("type"))
        .and_then(|a| a.value.clone())
        .unwrap_or_else(|| "text".to_string());
    match input_type.as_str() {
        "checkbox" => WidgetKind::Checkbox,
        "radio" => WidgetKind::Radio,
        _ => WidgetKind::Input,
    }
}

fn first_text_descendant(node: &TemplateNode) -> Option<String> {
    for child in &node.children {
        match child.kind {
            TemplateNodeKind::Text | TemplateNodeKind::BoundText => {
                if let Some(v) = &child.value {
                    if !v.trim().is_empty() {
                        return Some(v.trim().to_string());
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn extract_validators(attributes: &BTreeMap<String, String>) -> Option<Validators> {
    let required = attributes.contains_key("required");
    let min_length = attributes.get("minlength").and_then(|v| v.parse().ok());
    let max_length = attributes.get("maxlength").and_then(|v| v.parse().ok());
    let pattern = attributes.get("pattern").cloned();
    let v = Validators {
        required,
        min_length,
        max_length,
        pattern,
    };
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}

/// Every element tag name in the tree, used as a bounded heuristic for
/// nested-component selector discovery (custom elements look just like
/// any other tag to this parser).
pub fn all_element_tag_names(node: &TemplateNode) -> Vec<String> {
    let mut out = Vec::new();
    collect_tag_names(node, &mut out);
    out
}

fn collect_tag_names(node: &TemplateNode, out: &mut Vec<String>) {
    if node.kind == TemplateNodeKind::Element {
        if let Some(name) = &node.name {
            if name.contains('-') {
                out.push(name.clone());
            }
        }
    }
    for child in &node.children {
        collect_tag_names(child, out);
    }
}
