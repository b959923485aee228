//! Parses a single route object literal's properties (spec.md §4.3 "Per-
//! route parsing"), grounded on the property-walking idiom in
//! `ngtsc::annotations::component::src::handler` (`object_property`,
//! `property_key_name` over `@Component({...})`'s own object literal).

use oxc_ast::ast as oxc;
use oxc_span::GetSpan;

use crate::ast::access::{self, object_property, property_key_name};
use crate::ast::truncate_deterministically;
use crate::model::{GuardBinding, GuardKind, Origin, PathMatch};

const MAX_ARG_TEXT: usize = 200;

pub struct RouteFields<'a> {
    pub raw_path: String,
    pub component_ident: Option<String>,
    pub redirect_to: Option<String>,
    pub path_match: PathMatch,
    pub load_children_specifier: Option<String>,
    pub load_component_ident: Option<String>,
    pub outlet: Option<String>,
    pub guards: Vec<GuardBinding>,
    pub resolvers: std::collections::BTreeMap<String, String>,
    pub data: std::collections::BTreeMap<String, String>,
    pub children: Option<&'a oxc::ArrayExpression<'a>>,
    pub span: (u32, u32),
}

pub fn parse_route_object<'a>(
    obj: &'a oxc::ObjectExpression<'a>,
    file: &str,
    source_text: &str,
) -> RouteFields<'a> {
    let span = {
        let s = obj.span();
        (s.start, s.end)
    };

    let raw_path = object_property(obj, "path")
        .and_then(access::get_string_literal_value)
        .unwrap_or_default();

    let component_ident = object_property(obj, "component").and_then(ident_name);

    let redirect_to = object_property(obj, "redirectTo").and_then(access::get_string_literal_value);

    let path_match = object_property(obj, "pathMatch")
        .and_then(access::get_string_literal_value)
        .map(|v| if v == "full" { PathMatch::Full } else { PathMatch::Prefix })
        .unwrap_or(PathMatch::Prefix);

    let load_children_specifier = object_property(obj, "loadChildren").and_then(|e| dynamic_import_specifier(e));
    let load_component_ident = object_property(obj, "loadComponent")
        .and_then(|e| dynamic_import_specifier(e).or_else(|| ident_name(e)));

    let outlet = object_property(obj, "outlet").and_then(access::get_string_literal_value);

    let mut guards = Vec::new();
    for (key, kind) in [
        ("canActivate", GuardKind::CanActivate),
        ("canLoad", GuardKind::CanLoad),
        ("canActivateChild", GuardKind::CanActivateChild),
        ("canDeactivate", GuardKind::CanDeactivate),
    ] {
        if let Some(expr) = object_property(obj, key) {
            for name in access::extract_array_of_identifiers(expr) {
                let (s, e) = access::expr_span(expr);
                guards.push(GuardBinding {
                    kind,
                    guard_name: name,
                    origin: Origin::new(file, s, e, source_text),
                });
            }
        }
    }

    let resolvers = object_property(obj, "resolve")
        .and_then(as_object)
        .map(string_keyed_identifiers)
        .unwrap_or_default();

    let data = object_property(obj, "data")
        .and_then(as_object)
        .map(|o| string_keyed_raw_values(o, source_text))
        .unwrap_or_default();

    let children = object_property(obj, "children").and_then(|e| match e {
        oxc::Expression::ArrayExpression(arr) => Some(arr.as_ref()),
        _ => None,
    });

    RouteFields {
        raw_path,
        component_ident,
        redirect_to,
        path_match,
        load_children_specifier,
        load_component_ident,
        outlet,
        guards,
        resolvers,
        data,
        children,
        span,
    }
}

fn ident_name(expr: &oxc::Expression) -> Option<String> {
    match expr {
        oxc::Expression::Identifier(id) => Some(id.name.to_string()),
        _ => None,
    }
}

/// `() => import('./path').then(m => m.Foo)` / `() => import('./path')`.
fn dynamic_import_specifier(expr: &oxc::Expression) -> Option<String> {
    let body = arrow_body_expr(expr)?;
    find_import_call_specifier(body)
}

fn arrow_body_expr<'a>(expr: &'a oxc::Expression<'a>) -> Option<&'a oxc::Expression<'a>> {
    match expr {
        oxc::Expression::ArrowFunctionExpression(f) => {
            if f.expression {
                f.body.statements.first().and_then(|s| match s {
                    oxc::Statement::ExpressionStatement(e) => Some(&e.expression),
                    _ => None,
                })
            } else {
                None
            }
        }
        _ => None,
    }
}

fn find_import_call_specifier<'a>(expr: &'a oxc::Expression<'a>) -> Option<String> {
    match expr {
        oxc::Expression::ImportExpression(imp) => access::get_string_literal_value(&imp.source),
        oxc::Expression::CallExpression(call) => {
            if let oxc::Expression::StaticMemberExpression(m) = &call.callee {
                if m.property.name == "then" {
                    return find_import_call_specifier(&m.object);
                }
            }
            None
        }
        _ => None,
    }
}

fn as_object<'a>(expr: &'a oxc::Expression<'a>) -> Option<&'a oxc::ObjectExpression<'a>> {
    match expr {
        oxc::Expression::ObjectExpression(o) => Some(o),
        _ => None,
    }
}

fn string_keyed_identifiers(obj: &oxc::ObjectExpression) -> std::collections::BTreeMap<String, String> {
    let mut out = std::collections::BTreeMap::new();
    for prop in &obj.properties {
        if let oxc::ObjectPropertyKind::ObjectProperty(p) = prop {
            if let Some(key) = property_key_name(&p.key) {
                if let Some(name) = ident_name(&p.value) {
                    out.insert(key, name);
                }
            }
        }
    }
    out
}

/// Non-string `data`/`resolve` values are recorded as their bounded
/// source text rather than dropped, since route `data` is free-form.
fn string_keyed_raw_values(
    obj: &oxc::ObjectExpression,
    source_text: &str,
) -> std::collections::BTreeMap<String, String> {
    let mut out = std::collections::BTreeMap::new();
    for prop in &obj.properties {
        if let oxc::ObjectPropertyKind::ObjectProperty(p) = prop {
            if let Some(key) = property_key_name(&p.key) {
                let text = access::get_string_literal_value(&p.value).unwrap_or_else(|| {
                    let (s, e) = access::expr_span(&p.value);
                    truncate_deterministically(access::slice(source_text, s, e), MAX_ARG_TEXT).to_string()
                });
                out.insert(key, text);
            }
        }
    }
    out
}
