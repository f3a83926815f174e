//! Ordered, comment-annotated document model
//!
//! Templates produced by the builder and templates handed to the dependency
//! extractor share this representation. Mapping order is insertion order and
//! is never rearranged by any transformation in this crate; sorting is a
//! rendering choice.

mod json;
mod node;
mod walk;

pub use node::{Comment, Mapping, Node, Scalar, Value};
pub use walk::{Path, PathSegment, Walk};

/// A complete template document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Parse a JSON template, keeping key order
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        Ok(Self::new(Node::from(value)))
    }

    /// Serialize as pretty-printed JSON; comments are not emitted
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serde_json::Value::from(&self.root))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// A top-level section such as `Resources`, if present and a mapping
    pub fn section(&self, name: &str) -> Option<&Mapping> {
        self.root.get(name).and_then(Node::as_mapping)
    }

    /// Every attached comment in traversal order
    pub fn comments(&self) -> Vec<Comment> {
        self.root.comments()
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}
