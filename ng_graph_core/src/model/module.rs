//! Module entity (spec.md §3 "Module", extracted by §4.4).

use std::collections::BTreeMap;

use serde::Serialize;

use super::origin::Origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModuleRole {
    Root,
    GlobalShared,
    Feature,
    LazyFeature,
    DeadOrUnreachable,
    Unknown,
}

/// A discovered `NgModule`-equivalent class, identified by its source file path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Source file path; also this module's node/entity id.
    pub id: String,
    pub name: String,
    pub role: ModuleRole,
    pub imports: Vec<String>,
    pub declarations: Vec<String>,
    pub providers: Vec<String>,
    pub exports: Vec<String>,
    /// Routes this module owns (populated post-route-extraction, §5 "module-owned-routes list").
    pub owned_routes: Vec<String>,
    pub has_bootstrap: bool,
    pub origin: Origin,
    /// Per-name origin, retained for edge provenance (§3 "Per-name maps").
    pub import_origins: BTreeMap<String, Origin>,
    pub export_origins: BTreeMap<String, Origin>,
}

impl Module {
    pub fn is_standalone_root_flag(&self) -> bool {
        // Metadata field `isStandaloneRoot` on the graph's Module node is
        // always false for this extractor: standalone bootstrap entrypoints
        // (bootstrapApplication) are out of scope for the declared-in-module
        // resolution this crate performs (§4.8 "resolved root module").
        false
    }
}
