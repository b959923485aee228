//! Guard Constraint Summarizer (spec.md §4.7): a bounded, source-
//! proximity heuristic over each guard class's own body text — not a
//! symbolic or type-checked evaluation. Summaries merge across a
//! route's guards (§4.7).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use oxc_ast::ast as oxc;
use oxc_span::GetSpan;
use regex::Regex;

use crate::ast::Project;
use crate::model::ConstraintSummary;
use crate::routes::RouteMap;

const MAX_SCAN_BYTES: usize = 4000;

const AUTH_KEYWORDS: &[&str] = &[
    "isloggedin",
    "isauthenticated",
    "authservice",
    "authguard",
    "authenticated",
    "currentuser",
    "gettoken",
    "issignedin",
];

const ROLE_TRIGGER_KEYWORDS: &[&str] = &[
    "hasrole",
    "haspermission",
    "checkrole",
    "userrole",
    "requiredrole",
    "roles",
    "permissions",
];

/// Fixed mapping from sentinel property accesses to entity-state tokens.
const ENTITY_STATE_MAP: &[(&str, &str)] = &[("isOrgSelected", "orgSelected"), ("tenantId", "tenantSelected")];

static ROLE_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([A-Za-z][A-Za-z0-9_-]*)['"]"#).unwrap());

pub fn summarize_guards(project: &Project, routes: &RouteMap) -> BTreeMap<String, ConstraintSummary> {
    let mut by_guard_name: BTreeMap<String, ConstraintSummary> = BTreeMap::new();
    let mut out = BTreeMap::new();

    for route in routes.routes.values() {
        let mut summary = ConstraintSummary::default();
        for guard in &route.common().guards {
            let per_guard = by_guard_name
                .entry(guard.guard_name.clone())
                .or_insert_with(|| summarize_guard_class(project, &guard.guard_name))
                .clone();
            summary = summary.merge(per_guard);
        }
        out.insert(route.id().to_string(), summary);
    }
    out
}

fn summarize_guard_class(project: &Project, guard_name: &str) -> ConstraintSummary {
    let Some((file_text, class_span)) = find_class_body(project, guard_name) else {
        return ConstraintSummary::default();
    };
    let (start, end) = class_span;
    let bounded_end = (start as usize + MAX_SCAN_BYTES).min(end as usize).min(file_text.len());
    let body = &file_text[(start as usize).min(file_text.len())..bounded_end];

    let mut summary = ConstraintSummary::default();
    let lower = body.to_lowercase();

    summary.auth_required = AUTH_KEYWORDS.iter().any(|kw| lower.contains(kw));

    if ROLE_TRIGGER_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        let mut roles: Vec<String> = ROLE_LITERAL
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .collect();
        roles.sort();
        roles.dedup();
        summary.roles_required = roles;
    }

    summary.feature_flags = extract_quoted_calls(body, &["isenabled", "featureflag", "hasflag"]);

    let mut entity_state: Vec<String> = ENTITY_STATE_MAP
        .iter()
        .filter(|(prop, _)| body.contains(prop))
        .map(|(_, token)| token.to_string())
        .collect();
    entity_state.sort();
    entity_state.dedup();
    summary.requires_entity_state = entity_state;

    summary
}

fn extract_quoted_calls(body: &str, call_names_lower: &[&str]) -> Vec<String> {
    let lower = body.to_lowercase();
    let mut out = Vec::new();
    for call_name in call_names_lower {
        let mut search_from = 0;
        while let Some(rel) = lower[search_from..].find(call_name) {
            let call_start = search_from + rel + call_name.len();
            if let Some(value) = extract_first_quoted(&body[call_start.min(body.len())..]) {
                out.push(value);
            }
            search_from = call_start;
        }
    }
    out.sort();
    out.dedup();
    out
}

fn extract_first_quoted(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let open = bytes.iter().position(|&b| b == b'(')?;
    let rest = &s[open + 1..];
    let quote_pos = rest.find(['\'', '"'])?;
    let quote = rest.as_bytes()[quote_pos];
    let after = &rest[quote_pos + 1..];
    let close = after.find(quote as char)?;
    Some(after[..close].to_string())
}

fn find_class_body(project: &Project, class_name: &str) -> Option<(String, (u32, u32))> {
    for file in project.files() {
        for stmt in &file.program().body {
            let class = match stmt {
                oxc::Statement::ClassDeclaration(c) => Some(c.as_ref()),
                oxc::Statement::ExportNamedDeclaration(e) => match &e.declaration {
                    Some(oxc::Declaration::ClassDeclaration(c)) => Some(c.as_ref()),
                    _ => None,
                },
                _ => None,
            };
            if let Some(class) = class {
                if class.id.as_ref().map(|i| i.name.as_str()) == Some(class_name) {
                    let span = class.span();
                    return Some((file.text.clone(), (span.start, span.end)));
                }
            }
        }
    }
    None
}
