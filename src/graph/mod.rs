//! Dependency graph extraction
//!
//! Turns a template document back into the relationships between its named
//! entries: explicit ordering declarations, value references, attribute
//! references and condition references.

mod extract;
mod types;

pub use extract::extract;
pub use types::{DependencyGraph, Edge, EdgeTag, Section};
