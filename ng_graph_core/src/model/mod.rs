//! Algebraic data types for every entity in spec.md §3.

pub mod component;
pub mod constraint;
pub mod graph;
pub mod module;
pub mod origin;
pub mod route;
pub mod service;
pub mod widget;

pub use component::{Component, TemplateSource};
pub use constraint::{ConstraintSummary, ConstraintSurface};
pub use graph::{Edge, EdgeHandler, EdgeKind, EdgeTrigger, Multigraph, Node, NodeKind, Stats};
pub use module::{Module, ModuleRole};
pub use origin::{Origin, SourceRef};
pub use route::{extract_route_params, GuardBinding, GuardKind, PathMatch, Route, RouteCommon, RouteParams};
pub use service::Service;
pub use widget::{
    BindingKind, CallContext, CallContextTag, CallContextTarget, Predicate, PredicateKind,
    Validators, Widget, WidgetBinding, WidgetEvent, WidgetKind,
};
