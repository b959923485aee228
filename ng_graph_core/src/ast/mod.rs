//! Typed-AST access layer (spec.md §4.1) and project loading.

pub mod access;
pub mod project;
pub mod truncate;

pub use access::*;
pub use project::{Project, SourceFile};
pub use truncate::truncate_deterministically;
