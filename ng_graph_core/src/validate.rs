//! Validator (spec.md §4.9): seven fail-fast invariant checks run over
//! the assembled [`Multigraph`] before serialization. Every failure is a
//! `ValidationError` carrying the offending id, never a silent drop.

use std::collections::{BTreeSet, HashSet};

use crate::error::{ValidationError, ValidationErrorKind};
use crate::model::{EdgeKind, Multigraph, Stats};

pub fn validate(graph: &Multigraph) -> Result<(), ValidationError> {
    check_duplicate_node_ids(graph)?;
    check_duplicate_edge_ids(graph)?;
    check_dangling_edges(graph)?;
    check_empty_refs(graph)?;
    check_target_route_id_nullability(graph)?;
    check_sort_order(graph)?;
    check_stats(graph)?;
    Ok(())
}

fn check_duplicate_node_ids(graph: &Multigraph) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        if !seen.insert(&node.id) {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateNodeId,
                node.id.clone(),
                "node id appears more than once",
            ));
        }
    }
    Ok(())
}

fn check_duplicate_edge_ids(graph: &Multigraph) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for edge in &graph.edges {
        if !seen.insert(&edge.id) {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateEdgeId,
                edge.id.clone(),
                "edge id appears more than once",
            ));
        }
    }
    Ok(())
}

fn check_dangling_edges(graph: &Multigraph) -> Result<(), ValidationError> {
    let node_ids: BTreeSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in &graph.edges {
        if !node_ids.contains(edge.from.as_str()) {
            return Err(ValidationError::new(
                ValidationErrorKind::DanglingEdgeFrom,
                edge.id.clone(),
                format!("edge.from {} does not reference an existing node", edge.from),
            ));
        }
        if let Some(to) = &edge.to {
            if !node_ids.contains(to.as_str()) {
                return Err(ValidationError::new(
                    ValidationErrorKind::DanglingEdgeTo,
                    edge.id.clone(),
                    format!("edge.to {} does not reference an existing node", to),
                ));
            }
        }
    }
    Ok(())
}

fn check_empty_refs(graph: &Multigraph) -> Result<(), ValidationError> {
    for node in &graph.nodes {
        if node.refs.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyNodeRefs,
                node.id.clone(),
                "node.refs must carry at least one source reference",
            ));
        }
    }
    for edge in &graph.edges {
        if edge.refs.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyEdgeRefs,
                edge.id.clone(),
                "edge.refs must carry at least one source reference",
            ));
        }
    }
    Ok(())
}

/// `targetRouteId` is set if and only if `edge.to` is set, for every
/// navigation-shaped edge (spec.md §4.8/§4.9).
fn check_target_route_id_nullability(graph: &Multigraph) -> Result<(), ValidationError> {
    for edge in &graph.edges {
        if !matches!(
            edge.kind,
            EdgeKind::WidgetNavigatesRoute | EdgeKind::ComponentNavigatesRoute | EdgeKind::RouteRedirectsToRoute
        ) {
            continue;
        }
        if edge.to.is_some() != edge.target_route_id.is_some() {
            return Err(ValidationError::new(
                ValidationErrorKind::TargetRouteIdNullMismatch,
                edge.id.clone(),
                "edge.to and targetRouteId must both be set or both be null",
            ));
        }
    }
    Ok(())
}

fn check_sort_order(graph: &Multigraph) -> Result<(), ValidationError> {
    for pair in graph.nodes.windows(2) {
        if pair[0].id > pair[1].id {
            return Err(ValidationError::new(
                ValidationErrorKind::NodesNotSorted,
                pair[1].id.clone(),
                "nodes must be sorted by id",
            ));
        }
    }
    for pair in graph.edges.windows(2) {
        if pair[0].sort_key() > pair[1].sort_key() {
            return Err(ValidationError::new(
                ValidationErrorKind::EdgesNotSorted,
                pair[1].id.clone(),
                "edges must be sorted by (from, kind, to, id)",
            ));
        }
    }
    Ok(())
}

fn check_stats(graph: &Multigraph) -> Result<(), ValidationError> {
    let stats = crate::graph::compute_stats(graph);
    let expected = Stats {
        node_count: graph.nodes.len(),
        edge_count: graph.edges.len(),
        structural_edge_count: graph.edges.iter().filter(|e| e.kind.is_structural()).count(),
        executable_edge_count: graph.edges.iter().filter(|e| e.kind.is_executable()).count(),
    };
    if stats.node_count != expected.node_count
        || stats.edge_count != expected.edge_count
        || stats.structural_edge_count != expected.structural_edge_count
        || stats.executable_edge_count != expected.executable_edge_count
    {
        return Err(ValidationError::new(
            ValidationErrorKind::StatsMismatch,
            "__stats__",
            "computed stats do not match the edge-kind partition",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, NodeKind, SourceRef};

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            kind: NodeKind::Module,
            label: id.to_string(),
            refs: vec![SourceRef { file: "a.ts".into(), start: 0, end: 1 }],
            metadata: serde_json::json!({}),
        }
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = Multigraph::default();
        assert!(validate(&graph).is_ok());
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let graph = Multigraph {
            nodes: vec![node("x"), node("x")],
            edges: vec![],
        };
        let err = validate(&graph).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateNodeId);
    }

    #[test]
    fn unsorted_nodes_are_rejected() {
        let graph = Multigraph {
            nodes: vec![node("b"), node("a")],
            edges: vec![],
        };
        let err = validate(&graph).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NodesNotSorted);
    }
}
