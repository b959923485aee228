//! Component entity (spec.md §3 "Component", extracted by §4.5).

use serde::Serialize;

use super::origin::Origin;

#[derive(Debug, Clone, Serialize)]
pub enum TemplateSource {
    /// Inline `template: "..."` — sentinel value carried on the Component
    /// node metadata is the literal string `"<inline>"` (spec.md §3:
    /// "template-url or inline sentinel").
    Inline,
    Url(String),
}

impl TemplateSource {
    pub const INLINE_SENTINEL: &'static str = "<inline>";

    pub fn as_metadata_string(&self) -> String {
        match self {
            TemplateSource::Inline => Self::INLINE_SENTINEL.to_string(),
            TemplateSource::Url(u) => u.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// `"<file>#<className>"`.
    pub id: String,
    pub name: String,
    pub file: String,
    pub selector: String,
    pub template_source: TemplateSource,
    pub template_origin: Origin,
    pub widget_ids: Vec<String>,
    pub nested_component_selectors: Vec<String>,
    pub declaring_modules: Vec<String>,
    pub origin: Origin,
}
