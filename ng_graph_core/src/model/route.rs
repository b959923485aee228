//! Route entity (spec.md §3 "Route", extracted/normalized by §4.3).
//!
//! Tagged variant in place of the inheritance the teacher's own `Route`
//! class hierarchy elsewhere in the workspace uses for AST node unions
//! (see design note in spec.md §9: "tagged variants replace the
//! inheritance used in the source for Route, Node, Edge, CallContext").

use std::collections::BTreeMap;

use serde::Serialize;

use super::origin::Origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Hash, PartialOrd, Ord)]
pub enum GuardKind {
    CanActivate,
    CanLoad,
    CanActivateChild,
    CanDeactivate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, PartialOrd, Ord)]
pub struct GuardBinding {
    pub kind: GuardKind,
    pub guard_name: String,
    pub origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathMatch {
    Full,
    Prefix,
}

/// Fields shared by every route variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCommon {
    pub id: String,
    pub raw_path: String,
    pub full_path: String,
    pub module_source_file: String,
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
    pub outlet: Option<String>,
    pub guards: Vec<GuardBinding>,
    pub resolvers: BTreeMap<String, String>,
    pub data: BTreeMap<String, String>,
    pub params: RouteParams,
    pub origin: Origin,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParams {
    pub route_params: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum Route {
    ComponentRoute {
        #[serde(flatten)]
        common: RouteCommon,
        component_id: String,
    },
    RedirectRoute {
        #[serde(flatten)]
        common: RouteCommon,
        redirect_to: String,
        redirect_to_full_path: String,
        path_match: PathMatch,
    },
    WildcardRoute {
        #[serde(flatten)]
        common: RouteCommon,
        component_id: Option<String>,
    },
}

impl Route {
    pub fn common(&self) -> &RouteCommon {
        match self {
            Route::ComponentRoute { common, .. } => common,
            Route::RedirectRoute { common, .. } => common,
            Route::WildcardRoute { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut RouteCommon {
        match self {
            Route::ComponentRoute { common, .. } => common,
            Route::RedirectRoute { common, .. } => common,
            Route::WildcardRoute { common, .. } => common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn full_path(&self) -> &str {
        &self.common().full_path
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Route::WildcardRoute { .. })
    }

    /// Resolved component id, if this variant carries one and it isn't a
    /// sentinel (`__unknown__`/`__unresolved__#...`).
    pub fn resolved_component_id(&self) -> Option<&str> {
        let raw = match self {
            Route::ComponentRoute { component_id, .. } => Some(component_id.as_str()),
            Route::WildcardRoute {
                component_id: Some(c),
                ..
            } => Some(c.as_str()),
            _ => None,
        }?;
        if raw == "__unknown__" || raw.starts_with("__unresolved__#") {
            None
        } else {
            Some(raw)
        }
    }

    /// Resolution-quality score used to pick the canonical member of a
    /// dedup group (§4.3 "Deduplication and canonical selection"):
    /// resolved component > synthesized component id > `__unknown__`.
    pub fn resolution_score(&self) -> u8 {
        let raw = match self {
            Route::ComponentRoute { component_id, .. } => Some(component_id.as_str()),
            Route::WildcardRoute {
                component_id: Some(c),
                ..
            } => Some(c.as_str()),
            _ => None,
        };
        match raw {
            Some(id) if id == "__unknown__" || id.starts_with("__unresolved__#") => 0,
            Some(id) if id.contains('#') => 2,
            Some(_) => 1,
            None => 0,
        }
    }

    pub fn compute_route_id(full_path: &str, module_source_file: &str) -> String {
        format!("{}@{}", full_path, module_source_file)
    }
}

/// Sorted, deduplicated route params extracted from a `fullPath`, per
/// the `extractRouteParams` rule in spec.md §4.3.
pub fn extract_route_params(full_path: &str) -> Vec<String> {
    let mut params: Vec<String> = full_path
        .split('/')
        .filter(|seg| seg.starts_with(':'))
        .map(|seg| seg[1..].to_string())
        .collect();
    params.sort();
    params.dedup();
    params
}
