//! Route-array literal discovery (spec.md §4.3 "Discovery").
//!
//! Grounded on the statement/expression matching idiom in
//! `ngtsc::metadata::src::reader` (iterating `program.body`, matching
//! `Statement`/`Declaration`/`Expression` variants) and the decorator
//! inspection in `ngtsc::reflection::src::typescript`.

use oxc_ast::ast as oxc;
use oxc_span::GetSpan;

use crate::ast::{access, Project, SourceFile};

pub struct RouteLiteral {
    pub file: String,
    pub start_offset: u32,
    pub array: &'static oxc::ArrayExpression<'static>,
}

/// Discovers every route-array literal in the project, deduplicated by
/// `(filePath, startOffset)`.
pub fn discover_route_arrays(project: &Project) -> Vec<RouteLiteral> {
    let mut out: Vec<RouteLiteral> = Vec::new();
    let mut seen: std::collections::HashSet<(String, u32)> = std::collections::HashSet::new();

    for file in project.files() {
        for stmt in &file.program().body {
            collect_from_statement(file, stmt, &mut out, &mut seen);
        }
    }
    out
}

fn collect_from_statement(
    file: &SourceFile,
    stmt: &'static oxc::Statement<'static>,
    out: &mut Vec<RouteLiteral>,
    seen: &mut std::collections::HashSet<(String, u32)>,
) {
    match stmt {
        oxc::Statement::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                try_rule_a(file, declarator, out, seen);
                if let Some(init) = &declarator.init {
                    collect_calls_in_expr(file, init, out, seen);
                }
            }
        }
        oxc::Statement::ExportNamedDeclaration(export) => {
            if let Some(oxc::Declaration::VariableDeclaration(decl)) = &export.declaration {
                for declarator in &decl.declarations {
                    try_rule_a(file, declarator, out, seen);
                    if let Some(init) = &declarator.init {
                        collect_calls_in_expr(file, init, out, seen);
                    }
                }
            }
        }
        oxc::Statement::ExpressionStatement(expr_stmt) => {
            collect_calls_in_expr(file, &expr_stmt.expression, out, seen);
        }
        oxc::Statement::ClassDeclaration(class) => {
            for decorator in &class.decorators {
                if let oxc::Expression::CallExpression(call) = &decorator.expression {
                    for arg in &call.arguments {
                        if let Some(e) = arg.as_expression() {
                            collect_calls_in_expr(file, e, out, seen);
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

/// Rule (a): a variable declarator named `routes`, or whose declared
/// type reads as `Routes`/`Route[]`, initialized to an array literal.
fn try_rule_a(
    file: &SourceFile,
    declarator: &'static oxc::VariableDeclarator<'static>,
    out: &mut Vec<RouteLiteral>,
    seen: &mut std::collections::HashSet<(String, u32)>,
) {
    let name = match &declarator.id.kind {
        oxc::BindingPatternKind::BindingIdentifier(id) => id.name.as_str(),
        _ => return,
    };
    let type_matches = declarator
        .id
        .type_annotation
        .as_ref()
        .map(|ann| type_reads_as_routes(&ann.type_annotation))
        .unwrap_or(false);

    if name != "routes" && !type_matches {
        return;
    }
    if let Some(oxc::Expression::ArrayExpression(arr)) = &declarator.init {
        push_unique(file, arr, out, seen);
    }
}

fn type_reads_as_routes(ty: &oxc::TSType) -> bool {
    match ty {
        oxc::TSType::TSTypeReference(r) => match &r.type_name {
            oxc::TSTypeName::IdentifierReference(id) => id.name == "Routes",
            _ => false,
        },
        oxc::TSType::TSArrayType(arr) => match &arr.element_type {
            oxc::TSType::TSTypeReference(r) => match &r.type_name {
                oxc::TSTypeName::IdentifierReference(id) => id.name == "Route",
                _ => false,
            },
            _ => false,
        },
        _ => false,
    }
}

/// Rule (b): `RouterModule.forRoot`/`forChild` call expressions,
/// recursively discovered inside arbitrary nested object/array/call
/// literals (e.g. an `@NgModule({ imports: [...] })` decorator).
fn collect_calls_in_expr(
    file: &SourceFile,
    expr: &'static oxc::Expression<'static>,
    out: &mut Vec<RouteLiteral>,
    seen: &mut std::collections::HashSet<(String, u32)>,
) {
    match expr {
        oxc::Expression::CallExpression(call) => {
            if is_router_module_call(call) {
                if let Some(first) = call.arguments.first().and_then(|a| a.as_expression()) {
                    resolve_forroot_argument(file, first, out, seen);
                }
            }
            for arg in &call.arguments {
                if let Some(e) = arg.as_expression() {
                    collect_calls_in_expr(file, e, out, seen);
                }
            }
        }
        oxc::Expression::ObjectExpression(obj) => {
            for prop in &obj.properties {
                if let oxc::ObjectPropertyKind::ObjectProperty(p) = prop {
                    collect_calls_in_expr(file, &p.value, out, seen);
                }
            }
        }
        oxc::Expression::ArrayExpression(arr) => {
            for el in &arr.elements {
                if let Some(e) = el.as_expression() {
                    collect_calls_in_expr(file, e, out, seen);
                }
            }
        }
        oxc::Expression::TSAsExpression(e) => collect_calls_in_expr(file, &e.expression, out, seen),
        oxc::Expression::TSSatisfiesExpression(e) => collect_calls_in_expr(file, &e.expression, out, seen),
        _ => {}
    }
}

fn is_router_module_call(call: &oxc::CallExpression) -> bool {
    if let oxc::Expression::StaticMemberExpression(member) = &call.callee {
        let prop = member.property.name.as_str();
        if prop != "forRoot" && prop != "forChild" {
            return false;
        }
        if let oxc::Expression::Identifier(obj) = &member.object {
            return obj.name == "RouterModule";
        }
    }
    false
}

/// First argument can be an array literal directly, an identifier
/// resolvable to an array-literal initializer (same-file only; cross-
/// file/import-alias resolution happens in `super::lazy`), or a
/// type-assertion wrapper (`as T` / `satisfies T`). Otherwise the call
/// is silently skipped (spec.md §4.3).
fn resolve_forroot_argument(
    file: &SourceFile,
    arg: &'static oxc::Expression<'static>,
    out: &mut Vec<RouteLiteral>,
    seen: &mut std::collections::HashSet<(String, u32)>,
) {
    match arg {
        oxc::Expression::ArrayExpression(arr) => push_unique(file, arr, out, seen),
        oxc::Expression::TSAsExpression(e) => resolve_forroot_argument(file, &e.expression, out, seen),
        oxc::Expression::TSSatisfiesExpression(e) => {
            resolve_forroot_argument(file, &e.expression, out, seen)
        }
        oxc::Expression::Identifier(id) => {
            if let Some(arr) = find_array_literal_declarator(file, id.name.as_str()) {
                push_unique(file, arr, out, seen);
            }
        }
        _ => {}
    }
}

fn find_array_literal_declarator(
    file: &SourceFile,
    name: &str,
) -> Option<&'static oxc::ArrayExpression<'static>> {
    for stmt in &file.program().body {
        let decl = match stmt {
            oxc::Statement::VariableDeclaration(d) => Some(d.as_ref()),
            oxc::Statement::ExportNamedDeclaration(e) => match &e.declaration {
                Some(oxc::Declaration::VariableDeclaration(d)) => Some(d.as_ref()),
                _ => None,
            },
            _ => None,
        };
        let Some(decl) = decl else { continue };
        for declarator in &decl.declarations {
            if let oxc::BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind {
                if id.name.as_str() == name {
                    if let Some(oxc::Expression::ArrayExpression(arr)) = &declarator.init {
                        return Some(arr);
                    }
                }
            }
        }
    }
    None
}

fn push_unique(
    file: &SourceFile,
    arr: &'static oxc::ArrayExpression<'static>,
    out: &mut Vec<RouteLiteral>,
    seen: &mut std::collections::HashSet<(String, u32)>,
) {
    let start = arr.span().start;
    let key = (file.path.to_string_lossy().to_string(), start);
    if seen.insert(key.clone()) {
        out.push(RouteLiteral {
            file: key.0,
            start_offset: start,
            array: arr,
        });
    }
}

/// Quotes the substring of `raw` that looks like the first string-
/// literal argument of a `loadChildren`/`loadComponent` dynamic
/// `import()` expression — the "bounded pattern" of spec.md §4.3.
pub fn extract_first_quoted_specifier(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'\'' || c == b'"' || c == b'`' {
            let quote = c;
            let start = i + 1;
            let mut j = start;
            while j < bytes.len() && bytes[j] != quote {
                j += 1;
            }
            if j < bytes.len() {
                return Some(raw[start..j].to_string());
            }
        }
        i += 1;
    }
    None
}

// Re-exported for the AST access layer's generic import resolution use
// (SPEC_FULL.md §5, Open Question a).
pub use access::resolve_import_target;
