//! Widget + predicate + event entities (spec.md §3/§4.5/§4.6).

use std::collections::BTreeMap;

use serde::Serialize;

use super::origin::Origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetKind {
    Button,
    Link,
    Input,
    Select,
    Textarea,
    Form,
    Checkbox,
    Radio,
    MenuItem,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BindingKind {
    Attribute,
    BoundAttribute,
    Event,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBinding {
    pub kind: BindingKind,
    pub name: String,
    pub value: String,
    pub origin: Origin,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validators {
    pub required: bool,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub pattern: Option<String>,
}

impl Validators {
    pub fn is_empty(&self) -> bool {
        !self.required && self.min_length.is_none() && self.max_length.is_none() && self.pattern.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredicateKind {
    NgIf,
    NgSwitchCase,
    Disabled,
    Hidden,
    CustomDirective,
    PermissionDirective,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub kind: PredicateKind,
    pub expression: String,
    pub identifier_refs: Vec<String>,
    pub origin: Origin,
    /// Char-offset span in the template text, when known. Used by
    /// the position-based attachment heuristic (§4.5.2).
    pub span: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub component_id: String,
    pub kind: WidgetKind,
    pub tag: String,
    pub stable_index: u32,
    pub path: String,
    pub attributes: BTreeMap<String, String>,
    pub bindings: Vec<WidgetBinding>,
    pub text_label: Option<String>,
    pub validators: Option<Validators>,
    pub visibility_predicates: Vec<Predicate>,
    pub enablement_predicates: Vec<Predicate>,
    pub origin: Origin,
    /// Supplemented debug-only field (SPEC_FULL.md §5, Open Question b):
    /// true when at least one predicate attached under the offset
    /// heuristic (§4.5.2). Never part of the frozen phase1-bundle schema.
    pub predicate_containment_proven: bool,
}

impl Widget {
    pub fn make_id(component_id: &str, template_file: &str, line: u32, col: u32, kind: WidgetKind, stable_index: u32) -> String {
        format!(
            "{}|{}:{}:{}|{:?}|{}",
            component_id, template_file, line, col, kind, stable_index
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CallContextTag {
    Navigate,
    ServiceCall,
    StateUpdate,
    UiEffect,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContextTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_method: Option<String>,
}

impl Default for CallContextTarget {
    fn default() -> Self {
        CallContextTarget { route: None, url: None, service_method: None }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContext {
    pub tag: CallContextTag,
    pub target: CallContextTarget,
    pub arguments: Vec<String>,
    pub origin: Origin,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEvent {
    pub widget_id: String,
    pub event_type: String,
    pub handler_name: Option<String>,
    pub handler_origin: Option<Origin>,
    pub call_contexts: Vec<CallContext>,
}
