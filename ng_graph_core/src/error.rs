//! Error taxonomy (spec.md §7), generalized from the teacher's split
//! between typed internal errors (`thiserror`) and the orchestration
//! boundary (`anyhow`), mirrored from `perform_compile.rs`'s
//! `ParsedConfiguration`/`Diagnostic` split.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    DuplicateNodeId,
    DanglingEdgeFrom,
    DanglingEdgeTo,
    EmptyNodeRefs,
    EmptyEdgeRefs,
    TargetRouteIdNullMismatch,
    NodesNotSorted,
    EdgesNotSorted,
    DuplicateEdgeId,
    StatsMismatch,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationErrorKind::DuplicateNodeId => "duplicate node id",
            ValidationErrorKind::DanglingEdgeFrom => "edge.from does not reference an existing node",
            ValidationErrorKind::DanglingEdgeTo => "edge.to does not reference an existing node",
            ValidationErrorKind::EmptyNodeRefs => "node.refs is empty",
            ValidationErrorKind::EmptyEdgeRefs => "edge.refs is empty",
            ValidationErrorKind::TargetRouteIdNullMismatch => "targetRouteId nullability does not match edge.to",
            ValidationErrorKind::NodesNotSorted => "nodes are not sorted by id",
            ValidationErrorKind::EdgesNotSorted => "edges are not sorted by (from, kind, to, id)",
            ValidationErrorKind::DuplicateEdgeId => "duplicate edge id",
            ValidationErrorKind::StatsMismatch => "stats counts do not match the edge-kind partition",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("validation failed ({kind}) at {offending_id}: {detail}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub offending_id: String,
    pub detail: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, offending_id: impl Into<String>, detail: impl Into<String>) -> Self {
        ValidationError {
            kind,
            offending_id: offending_id.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid project root: {0}")]
    InvalidProjectRoot(PathBuf),
    #[error("invalid tsconfig path: {0}")]
    InvalidTsConfig(PathBuf),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
