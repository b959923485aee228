//! Event/Handler Analyzer (spec.md §4.6): maps each widget's event
//! binding to its handler method, then extracts up to 20 call
//! expressions from that method's body as bounded [`CallContext`]
//! evidence for navigation/service-call/state/UI-effect behavior.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use oxc_ast::ast as oxc;
use oxc_span::GetSpan;
use regex::Regex;

use crate::ast::access;
use crate::model::{
    BindingKind, CallContext, CallContextTag, CallContextTarget, Component, Origin, Widget, WidgetEvent,
};
use crate::ast::Project;

const MAX_CALL_CONTEXTS: usize = 20;

/// Exactly one dot between two identifier segments, with an optional
/// leading `this.` (spec.md §4.6 "service call resolution").
static SERVICE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:this\.)?([A-Za-z_$][A-Za-z0-9_$]*)\.([A-Za-z_$][A-Za-z0-9_$]*)$").unwrap());

pub fn analyze_events(
    project: &Project,
    components: &BTreeMap<String, Component>,
    widgets: &BTreeMap<String, Widget>,
) -> Vec<WidgetEvent> {
    let mut out = Vec::new();

    for widget in widgets.values() {
        let Some(component) = components.get(&widget.component_id) else {
            continue;
        };
        let Some(file) = project.get(&component.file) else {
            continue;
        };

        for binding in &widget.bindings {
            if binding.kind != BindingKind::Event {
                continue;
            }
            let handler_name = extract_call_name(&binding.value);
            let (handler_origin, call_contexts) = match &handler_name {
                Some(name) => match find_method(file, &component.name, name) {
                    Some(method) => {
                        let span = method.span();
                        let origin = Origin::new(&component.file, span.start, span.end, &file.text);
                        let calls = collect_call_contexts(method, &component.file, &file.text);
                        (Some(origin), calls)
                    }
                    None => (None, Vec::new()),
                },
                None => (None, Vec::new()),
            };

            out.push(WidgetEvent {
                widget_id: widget.id.clone(),
                event_type: binding.name.clone(),
                handler_name,
                handler_origin,
                call_contexts,
            });
        }

        if has_navigation_binding(widget) {
            out.push(WidgetEvent {
                widget_id: widget.id.clone(),
                event_type: "navigation".to_string(),
                handler_name: None,
                handler_origin: None,
                call_contexts: Vec::new(),
            });
        }
    }

    out.sort_by(|a, b| (a.widget_id.clone(), a.event_type.clone()).cmp(&(b.widget_id.clone(), b.event_type.clone())));
    out
}

/// A `routerLink`/`href` binding or attribute produces a synthetic
/// `navigation` event with no handler or call contexts (spec.md §4.6).
fn has_navigation_binding(widget: &Widget) -> bool {
    let bound = widget
        .bindings
        .iter()
        .any(|b| matches!(b.kind, BindingKind::BoundAttribute) && matches!(b.name.to_lowercase().as_str(), "routerlink" | "href"));
    let statik = widget
        .attributes
        .keys()
        .any(|k| matches!(k.to_lowercase().as_str(), "routerlink" | "href"));
    bound || statik
}

/// The leading call's callee name in a handler expression like
/// `go($event)` or `onSubmit()`; `None` for non-call expressions
/// (e.g. plain property writes).
fn extract_call_name(expr_text: &str) -> Option<String> {
    let trimmed = expr_text.trim();
    let paren = trimmed.find('(')?;
    let name = trimmed[..paren].trim();
    if name.is_empty() || !name.chars().next().map(|c| c.is_alphabetic() || c == '_').unwrap_or(false) {
        return None;
    }
    if name.contains(['.', ' ']) {
        return name.rsplit('.').next().map(|s| s.to_string());
    }
    Some(name.to_string())
}

fn find_method<'a>(
    file: &'a crate::ast::SourceFile,
    class_name: &str,
    method_name: &str,
) -> Option<&'a oxc::Function<'a>> {
    for stmt in &file.program().body {
        let class = match stmt {
            oxc::Statement::ClassDeclaration(c) => Some(c.as_ref()),
            oxc::Statement::ExportNamedDeclaration(e) => match &e.declaration {
                Some(oxc::Declaration::ClassDeclaration(c)) => Some(c.as_ref()),
                _ => None,
            },
            _ => None,
        };
        let Some(class) = class else { continue };
        if class.id.as_ref().map(|i| i.name.as_str()) != Some(class_name) {
            continue;
        }
        for member in &class.body.body {
            if let oxc::ClassElement::MethodDefinition(m) = member {
                if access::property_key_name(&m.key).as_deref() == Some(method_name) {
                    return Some(m.value.as_ref());
                }
            }
        }
    }
    None
}

/// Evidence gathered from a handler body: either a call expression
/// (classified by callee shape) or a bare assignment statement, which
/// spec.md §4.6 treats as `StateUpdate` evidence in its own right when
/// its text begins `this.` and contains `=`.
enum Evidence<'a> {
    Call(&'a oxc::CallExpression<'a>),
    Assignment(&'a oxc::AssignmentExpression<'a>),
}

fn collect_call_contexts(method: &oxc::Function, file_path: &str, source_text: &str) -> Vec<CallContext> {
    let mut evidence: Vec<Evidence> = Vec::new();
    if let Some(body) = &method.body {
        for stmt in &body.statements {
            collect_calls_in_statement(stmt, &mut evidence);
            if evidence.len() >= MAX_CALL_CONTEXTS {
                break;
            }
        }
    }
    evidence
        .into_iter()
        .take(MAX_CALL_CONTEXTS)
        .filter_map(|e| classify_evidence(e, file_path, source_text))
        .collect()
}

fn collect_calls_in_statement<'a>(stmt: &'a oxc::Statement<'a>, out: &mut Vec<Evidence<'a>>) {
    match stmt {
        oxc::Statement::ExpressionStatement(e) => collect_calls_in_expr(&e.expression, out),
        oxc::Statement::ReturnStatement(r) => {
            if let Some(e) = &r.argument {
                collect_calls_in_expr(e, out);
            }
        }
        oxc::Statement::IfStatement(i) => {
            collect_calls_in_statement(&i.consequent, out);
            if let Some(alt) = &i.alternate {
                collect_calls_in_statement(alt, out);
            }
        }
        oxc::Statement::BlockStatement(b) => {
            for s in &b.body {
                collect_calls_in_statement(s, out);
            }
        }
        oxc::Statement::VariableDeclaration(d) => {
            for decl in &d.declarations {
                if let Some(init) = &decl.init {
                    collect_calls_in_expr(init, out);
                }
            }
        }
        _ => {}
    }
}

fn collect_calls_in_expr<'a>(expr: &'a oxc::Expression<'a>, out: &mut Vec<Evidence<'a>>) {
    if out.len() >= MAX_CALL_CONTEXTS {
        return;
    }
    match expr {
        oxc::Expression::CallExpression(call) => {
            out.push(Evidence::Call(call));
            for arg in &call.arguments {
                if let Some(e) = arg.as_expression() {
                    collect_calls_in_expr(e, out);
                }
            }
        }
        oxc::Expression::ChainExpression(c) => {
            if let oxc::ChainElement::CallExpression(call) = &c.expression {
                out.push(Evidence::Call(call));
                for arg in &call.arguments {
                    if let Some(e) = arg.as_expression() {
                        collect_calls_in_expr(e, out);
                    }
                }
            }
        }
        oxc::Expression::AwaitExpression(a) => collect_calls_in_expr(&a.argument, out),
        oxc::Expression::AssignmentExpression(a) => {
            out.push(Evidence::Assignment(a));
            collect_calls_in_expr(&a.right, out);
        }
        _ => {}
    }
}

fn classify_evidence(evidence: Evidence, file_path: &str, source_text: &str) -> Option<CallContext> {
    match evidence {
        Evidence::Call(call) => Some(classify_call(call, file_path, source_text)),
        Evidence::Assignment(assign) => classify_assignment(assign, file_path, source_text),
    }
}

fn classify_call(call: &oxc::CallExpression, file_path: &str, source_text: &str) -> CallContext {
    let span = call.span();
    let origin = Origin::new(file_path, span.start, span.end, source_text);

    let callee_text = callee_path(&call.callee);
    let arguments: Vec<String> = call
        .arguments
        .iter()
        .take(5)
        .filter_map(|a| a.as_expression())
        .map(|e| {
            let (s, en) = access::expr_span(e);
            crate::ast::truncate_deterministically(access::slice(source_text, s, en), 120).to_string()
        })
        .collect();

    let (tag, target) = classify_tag_and_target(&callee_text, &arguments);
    CallContext {
        tag,
        target,
        arguments,
        origin,
    }
}

/// `this.foo = bar;` style assignments are `StateUpdate` evidence on
/// their own (spec.md §4.6), independent of whatever calls their RHS
/// might also contain.
fn classify_assignment(assign: &oxc::AssignmentExpression, file_path: &str, source_text: &str) -> Option<CallContext> {
    let span = assign.span();
    let text = access::slice(source_text, span.start, span.end);
    if !text.trim_start().starts_with("this.") || !text.contains('=') {
        return None;
    }
    let origin = Origin::new(file_path, span.start, span.end, source_text);
    Some(CallContext {
        tag: CallContextTag::StateUpdate,
        target: CallContextTarget::default(),
        arguments: Vec::new(),
        origin,
    })
}

fn callee_path(callee: &oxc::Expression) -> String {
    match callee {
        oxc::Expression::StaticMemberExpression(m) => {
            format!("{}.{}", callee_path(&m.object), m.property.name)
        }
        oxc::Expression::Identifier(id) => id.name.to_string(),
        oxc::Expression::ThisExpression(_) => "this".to_string(),
        _ => String::new(),
    }
}

fn classify_tag_and_target(callee_path: &str, arguments: &[String]) -> (CallContextTag, CallContextTarget) {
    let mut target = CallContextTarget::default();
    if callee_path.ends_with(".navigate") || callee_path.ends_with(".navigateByUrl") {
        target.route = arguments.first().cloned();
        return (CallContextTag::Navigate, target);
    }
    if callee_path.starts_with("window.location") || callee_path.starts_with("window.open") {
        target.url = arguments.first().cloned();
        return (CallContextTag::Navigate, target);
    }
    if SERVICE_CALL.is_match(callee_path) {
        target.service_method = Some(callee_path.to_string());
        return (CallContextTag::ServiceCall, target);
    }
    if callee_path.contains("dialog") || callee_path.contains("snackBar") || callee_path.contains("toast") {
        return (CallContextTag::UiEffect, target);
    }
    (CallContextTag::Unknown, target)
}
