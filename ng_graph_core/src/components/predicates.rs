//! Predicate extraction and attachment (spec.md §4.5.2): classifies
//! `*ngIf`/`*ngSwitchCase`/`[disabled]`/`[hidden]` and custom-directive
//! attributes into [`Predicate`]s, then attaches each predicate to
//! every widget whose origin offset is at or after the predicate's own
//! span start — an approximation of ancestor/self containment that
//! doesn't require a true tree walk. A predicate without a span (none
//! was recorded by the template parser) attaches to all widgets,
//! conservatively.

use crate::model::{Origin, Predicate, PredicateKind, Widget};
use crate::template::{TemplateNode, TemplateNodeKind};

pub fn attach_predicates(nodes: &[TemplateNode], template_text: &str, widgets: &mut [Widget]) {
    let mut predicates: Vec<Predicate> = Vec::new();
    collect_predicates(nodes, template_text, &mut predicates);

    for widget in widgets.iter_mut() {
        let mut proven = false;
        for p in &predicates {
            let applies = match p.span {
                Some((start, _)) => widget.origin.start >= start,
                None => true,
            };
            if !applies {
                continue;
            }
            if let Some((start, end)) = p.span {
                if start <= widget.origin.start && end >= widget.origin.end {
                    proven = true;
                }
            }
            if matches!(p.kind, PredicateKind::Disabled) {
                widget.enablement_predicates.push(p.clone());
            } else {
                widget.visibility_predicates.push(p.clone());
            }
        }
        widget.predicate_containment_proven = proven;
    }
}

fn collect_predicates(nodes: &[TemplateNode], template_text: &str, out: &mut Vec<Predicate>) {
    for node in nodes {
        if node.kind == TemplateNodeKind::Element {
            for a in &node.attributes {
                if let Some(p) = classify(a, template_text) {
                    out.push(p);
                }
            }
        }
        collect_predicates(&node.children, template_text, out);
    }
}

fn classify(attr: &TemplateNode, template_text: &str) -> Option<Predicate> {
    let name = attr.name.as_deref()?;
    let expression = attr.value.clone().unwrap_or_default();
    let span = attr.span.map(|s| (s.start, s.end));
    let origin_span = attr.span.unwrap_or(crate::template::Span { start: 0, end: 0 });
    let origin = Origin::new("<template>", origin_span.start, origin_span.end, template_text);
    let identifier_refs = extract_identifier_refs(&expression);

    let kind = match (attr.kind, name) {
        (TemplateNodeKind::Structural, "ngIf") => PredicateKind::NgIf,
        (TemplateNodeKind::Structural, "ngSwitchCase") => PredicateKind::NgSwitchCase,
        (TemplateNodeKind::Structural, _) => PredicateKind::CustomDirective,
        (TemplateNodeKind::BoundAttr, "disabled") => PredicateKind::Disabled,
        (TemplateNodeKind::BoundAttr, "hidden") => PredicateKind::Hidden,
        (TemplateNodeKind::Attr, n) if n.to_lowercase().starts_with("app") => {
            PredicateKind::PermissionDirective
        }
        _ => return None,
    };

    Some(Predicate {
        kind,
        expression,
        identifier_refs,
        origin,
        span,
    })
}

/// Sorted, deduplicated bare identifiers referenced in a predicate
/// expression, used as evidence in the constraint surface (§4.7).
fn extract_identifier_refs(expr: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for ch in expr.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '$' {
            current.push(ch);
        } else {
            if !current.is_empty() && current.chars().next().map(|c| c.is_alphabetic() || c == '_').unwrap_or(false) {
                out.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out.retain(|s| !matches!(s.as_str(), "true" | "false" | "null" | "undefined"));
    out.sort();
    out.dedup();
    out
}
