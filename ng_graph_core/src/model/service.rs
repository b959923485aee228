//! Service entity (spec.md §3 "Service").

use serde::Serialize;

use super::origin::Origin;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// `"<file>#<className>"`.
    pub id: String,
    pub name: String,
    pub file: String,
    pub origin: Origin,
    pub provided_in: Option<String>,
}
