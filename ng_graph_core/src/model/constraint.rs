//! ConstraintSurface (spec.md §3) + the guard heuristic summary it's
//! built from (§4.7).

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSurface {
    pub required_params: Vec<String>,
    pub guards: Vec<String>,
    pub roles: Vec<String>,
    pub ui_atoms: Vec<String>,
    pub evidence: Vec<String>,
}

impl ConstraintSurface {
    pub fn sorted_unique(mut self) -> Self {
        for v in [
            &mut self.required_params,
            &mut self.guards,
            &mut self.roles,
            &mut self.ui_atoms,
            &mut self.evidence,
        ] {
            v.sort();
            v.dedup();
        }
        self
    }
}

/// Bounded heuristic summary of a route's guards (§4.7). Not an
/// execution result — a source-proximity heuristic over the guard
/// declaration's textual body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSummary {
    pub auth_required: bool,
    pub roles_required: Vec<String>,
    pub feature_flags: Vec<String>,
    pub requires_entity_state: Vec<String>,
}

impl ConstraintSummary {
    /// Merge across a route's guards: list fields union-then-sort,
    /// booleans OR (§4.7 "Summaries merge across a route's guards").
    pub fn merge(mut self, other: ConstraintSummary) -> Self {
        self.auth_required |= other.auth_required;
        self.roles_required.extend(other.roles_required);
        self.feature_flags.extend(other.feature_flags);
        self.requires_entity_state.extend(other.requires_entity_state);
        for v in [
            &mut self.roles_required,
            &mut self.feature_flags,
            &mut self.requires_entity_state,
        ] {
            v.sort();
            v.dedup();
        }
        self
    }
}
