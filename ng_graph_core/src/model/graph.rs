//! Multigraph: nodes, edges, edge kinds (spec.md §3 "Multigraph").

use serde::Serialize;

use super::constraint::ConstraintSurface;
use super::origin::SourceRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Module,
    Route,
    Component,
    Widget,
    Service,
    External,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub refs: Vec<SourceRef>,
    pub metadata: serde_json::Value,
}

/// The 18 enumerated edge kinds (spec.md §3), partitioned into 11
/// structural + 7 executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeKind {
    // --- structural (11) ---
    ModuleImportsModule,
    ModuleExportsModule,
    ModuleDeclaresComponent,
    ModuleDeclaresRoute,
    RouteHasChild,
    RouteActivatesComponent,
    ComponentContainsWidget,
    WidgetComposesWidget,
    ComponentComposesComponent,
    ModuleProvidesService,
    ComponentProvidesService,
    // --- executable (7) ---
    WidgetNavigatesRoute,
    WidgetNavigatesExternal,
    WidgetTriggersHandler,
    WidgetSubmitsForm,
    ComponentCallsService,
    ComponentNavigatesRoute,
    RouteRedirectsToRoute,
}

impl EdgeKind {
    pub const STRUCTURAL: [EdgeKind; 11] = [
        EdgeKind::ModuleImportsModule,
        EdgeKind::ModuleExportsModule,
        EdgeKind::ModuleDeclaresComponent,
        EdgeKind::ModuleDeclaresRoute,
        EdgeKind::RouteHasChild,
        EdgeKind::RouteActivatesComponent,
        EdgeKind::ComponentContainsWidget,
        EdgeKind::WidgetComposesWidget,
        EdgeKind::ComponentComposesComponent,
        EdgeKind::ModuleProvidesService,
        EdgeKind::ComponentProvidesService,
    ];

    pub fn is_structural(&self) -> bool {
        Self::STRUCTURAL.contains(self)
    }

    pub fn is_executable(&self) -> bool {
        !self.is_structural()
    }

    /// Stable name used in edge ids and serialized `kind`; must never be
    /// renamed (spec.md §6 "frozen enumerations").
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::ModuleImportsModule => "MODULE_IMPORTS_MODULE",
            EdgeKind::ModuleExportsModule => "MODULE_EXPORTS_MODULE",
            EdgeKind::ModuleDeclaresComponent => "MODULE_DECLARES_COMPONENT",
            EdgeKind::ModuleDeclaresRoute => "MODULE_DECLARES_ROUTE",
            EdgeKind::RouteHasChild => "ROUTE_HAS_CHILD",
            EdgeKind::RouteActivatesComponent => "ROUTE_ACTIVATES_COMPONENT",
            EdgeKind::ComponentContainsWidget => "COMPONENT_CONTAINS_WIDGET",
            EdgeKind::WidgetComposesWidget => "WIDGET_COMPOSES_WIDGET",
            EdgeKind::ComponentComposesComponent => "COMPONENT_COMPOSES_COMPONENT",
            EdgeKind::ModuleProvidesService => "MODULE_PROVIDES_SERVICE",
            EdgeKind::ComponentProvidesService => "COMPONENT_PROVIDES_SERVICE",
            EdgeKind::WidgetNavigatesRoute => "WIDGET_NAVIGATES_ROUTE",
            EdgeKind::WidgetNavigatesExternal => "WIDGET_NAVIGATES_EXTERNAL",
            EdgeKind::WidgetTriggersHandler => "WIDGET_TRIGGERS_HANDLER",
            EdgeKind::WidgetSubmitsForm => "WIDGET_SUBMITS_FORM",
            EdgeKind::ComponentCallsService => "COMPONENT_CALLS_SERVICE",
            EdgeKind::ComponentNavigatesRoute => "COMPONENT_NAVIGATES_ROUTE",
            EdgeKind::RouteRedirectsToRoute => "ROUTE_REDIRECTS_TO_ROUTE",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeTrigger {
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_router_link: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHandler {
    pub component_id: String,
    pub method_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    #[serde(serialize_with = "serialize_kind")]
    pub kind: EdgeKind,
    pub from: String,
    pub to: Option<String>,
    pub constraints: ConstraintSurface,
    pub refs: Vec<SourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_system: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<EdgeTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<EdgeHandler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_text: Option<String>,
}

fn serialize_kind<S>(kind: &EdgeKind, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(kind.as_str())
}

impl Edge {
    /// `"<from>::<kind>::<to|__null__>::<groupIndex>"` (spec.md §3).
    pub fn make_id(from: &str, kind: EdgeKind, to: Option<&str>, group_index: u32) -> String {
        format!(
            "{}::{}::{}::{}",
            from,
            kind.as_str(),
            to.unwrap_or("__null__"),
            group_index
        )
    }

    /// Sort key: `(from, kind, to ?? "", id)` (spec.md §3/§4.9).
    pub fn sort_key(&self) -> (String, &'static str, String, String) {
        (
            self.from.clone(),
            self.kind.as_str(),
            self.to.clone().unwrap_or_default(),
            self.id.clone(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub node_count: usize,
    pub edge_count: usize,
    pub structural_edge_count: usize,
    pub executable_edge_count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Multigraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
