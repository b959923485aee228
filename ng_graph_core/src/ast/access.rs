//! Typed-AST access layer (spec.md §4.1), grounded on
//! `ngtsc::reflection::src::typescript::TypeScriptReflectionHost`'s
//! decorator-conversion idiom and `ngtsc::metadata::src::reader`'s
//! statement/expression matching style, generalized into free functions
//! over `oxc_ast` nodes rather than a `ReflectionHost` trait object
//! (this crate never needs the teacher's type-checker-backed variants —
//! only syntactic decorator/literal inspection).
//!
//! Failures return `None`/empty, never panic or propagate an error —
//! per spec.md §4.1 "Failures: returns null/empty; never throws."

use std::path::{Path, PathBuf};

use oxc_ast::ast as oxc;

use super::project::Project;
use super::truncate::truncate_deterministically;
use crate::model::Origin;

/// Finds a decorator named `name` on a class (e.g. `@Component`,
/// `@NgModule`, `@Injectable`).
pub fn find_decorator<'a>(class: &'a oxc::Class<'a>, name: &str) -> Option<&'a oxc::Decorator<'a>> {
    class.decorators.iter().find(|d| decorator_name(d) == Some(name))
}

pub fn decorator_name<'a>(decorator: &'a oxc::Decorator<'a>) -> Option<&'a str> {
    match &decorator.expression {
        oxc::Expression::CallExpression(call) => match &call.callee {
            oxc::Expression::Identifier(id) => Some(id.name.as_str()),
            _ => None,
        },
        oxc::Expression::Identifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

/// The first call argument's object-literal properties of a decorator
/// call, e.g. the `{ selector: ..., template: ... }` in `@Component({...})`.
pub fn decorator_options<'a>(decorator: &'a oxc::Decorator<'a>) -> Option<&'a oxc::ObjectExpression<'a>> {
    let call = match &decorator.expression {
        oxc::Expression::CallExpression(call) => call,
        _ => return None,
    };
    let first = call.arguments.first()?;
    match first.as_expression()? {
        oxc::Expression::ObjectExpression(obj) => Some(obj),
        _ => None,
    }
}

/// Looks up a property by key name on an object literal, e.g. the
/// `selector` property inside `@Component({...})`.
pub fn object_property<'a>(
    obj: &'a oxc::ObjectExpression<'a>,
    key: &str,
) -> Option<&'a oxc::Expression<'a>> {
    for prop in &obj.properties {
        if let oxc::ObjectPropertyKind::ObjectProperty(p) = prop {
            if property_key_name(&p.key).as_deref() == Some(key) {
                return Some(&p.value);
            }
        }
    }
    None
}

pub fn property_key_name(key: &oxc::PropertyKey) -> Option<String> {
    match key {
        oxc::PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        oxc::PropertyKey::Identifier(id) => Some(id.name.to_string()),
        oxc::PropertyKey::StringLiteral(s) => Some(s.value.to_string()),
        _ => None,
    }
}

/// `getOrigin`: derives an `Origin` from a `(start, end)` byte-offset
/// span, 1-based line/column computed from the file's source text.
pub fn get_origin(file: &str, source_text: &str, start: u32, end: u32, symbol_hint: Option<&str>) -> Origin {
    let mut origin = Origin::new(file, start, end, source_text);
    if let Some(sym) = symbol_hint {
        origin = origin.with_symbol(sym);
    }
    origin
}

/// Value of a string or no-substitution template literal; `None` for
/// anything else (including templates with interpolations).
pub fn get_string_literal_value(expr: &oxc::Expression) -> Option<String> {
    match expr {
        oxc::Expression::StringLiteral(s) => Some(s.value.to_string()),
        oxc::Expression::TemplateLiteral(t) => {
            if t.expressions.is_empty() && t.quasis.len() == 1 {
                t.quasis[0].value.cooked.as_ref().map(|c| c.to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Sorted, deduplicated identifier names from an array-literal
/// expression (e.g. `imports: [CommonModule, FooModule]`).
pub fn extract_array_of_identifiers(expr: &oxc::Expression) -> Vec<String> {
    let mut out = Vec::new();
    if let oxc::Expression::ArrayExpression(arr) = expr {
        for el in &arr.elements {
            if let Some(oxc::Expression::Identifier(id)) = el.as_expression() {
                out.push(id.name.to_string());
            }
        }
    }
    out.sort();
    out.dedup();
    out
}

/// Sorted, deduplicated string values from an array-literal expression.
pub fn extract_array_of_string_literals(expr: &oxc::Expression) -> Vec<String> {
    let mut out = Vec::new();
    if let oxc::Expression::ArrayExpression(arr) = expr {
        for el in &arr.elements {
            if let Some(e) = el.as_expression() {
                if let Some(v) = get_string_literal_value(e) {
                    out.push(v);
                }
            }
        }
    }
    out.sort();
    out.dedup();
    out
}

/// Up to `max_len` raw argument source texts of a call expression,
/// each bounded by the global truncation policy. `max_len` here is the
/// maximum *count* of arguments (10 in spec.md §4.1); each text is
/// bounded separately by the caller's string-length budget.
pub fn get_call_expression_args(
    call: &oxc::CallExpression,
    source_text: &str,
    max_args: usize,
    max_str_len: usize,
) -> Vec<String> {
    call.arguments
        .iter()
        .take(max_args)
        .filter_map(|arg| arg.as_expression())
        .map(|e| {
            let span = expr_span(e);
            let raw = slice(source_text, span.0, span.1);
            truncate_deterministically(raw, max_str_len)
        })
        .collect()
}

pub fn expr_span(expr: &oxc::Expression) -> (u32, u32) {
    use oxc_span::GetSpan;
    let span = expr.span();
    (span.start, span.end)
}

pub fn slice(source_text: &str, start: u32, end: u32) -> &str {
    let start = start as usize;
    let end = (end as usize).min(source_text.len());
    if start >= source_text.len() || start > end {
        return "";
    }
    &source_text[start..end]
}

/// Resolves an import specifier relative to `source_file`'s directory
/// to an absolute file path inside the project, or `None` for
/// third-party packages (non-relative specifiers).
pub fn resolve_import_target(project: &Project, source_file: &str, specifier: &str) -> Option<String> {
    if !(specifier.starts_with('.') ) {
        return None;
    }
    let base = Path::new(source_file).parent().unwrap_or(Path::new("."));
    let candidate: PathBuf = base.join(specifier);
    for suffix in ["", ".ts", ".tsx", "/index.ts", "/index.tsx"] {
        let p = if suffix.is_empty() {
            candidate.clone()
        } else {
            PathBuf::from(format!("{}{}", candidate.display(), suffix))
        };
        let key = normalize_path(&p);
        if project.contains(&key) {
            return Some(key);
        }
    }
    None
}

/// Finds the module specifier an identifier was imported from in this
/// file (e.g. `import { Foo } from './foo'` for `local_name == "Foo"`),
/// used to resolve route/module/provider references to the file that
/// actually declares them.
pub fn find_import_specifier(file: &super::project::SourceFile, local_name: &str) -> Option<String> {
    for stmt in &file.program().body {
        if let oxc::Statement::ImportDeclaration(import) = stmt {
            let Some(specifiers) = &import.specifiers else {
                continue;
            };
            for spec in specifiers {
                let name = match spec {
                    oxc::ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.as_str(),
                    oxc::ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        s.local.name.as_str()
                    }
                    oxc::ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        s.local.name.as_str()
                    }
                };
                if name == local_name {
                    return Some(import.source.value.to_string());
                }
            }
        }
    }
    None
}

fn normalize_path(p: &Path) -> String {
    // Lightweight lexical normalization (`.`/`..` segment collapsing)
    // without touching the filesystem, since the target may not exist
    // under this exact spelling yet (extension probing happens in the
    // caller).
    let mut out: Vec<std::ffi::OsString> = Vec::new();
    for comp in p.components() {
        use std::path::Component;
        match comp {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str().to_os_string()),
        }
    }
    let mut result = PathBuf::new();
    for c in out {
        result.push(c);
    }
    result.to_string_lossy().to_string()
}
