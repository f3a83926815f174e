//! Node types for the ordered, comment-carrying document tree

use std::fmt;

use indexmap::IndexMap;

use super::walk::{Path, Walk};

/// Ordered key/value pairs of a mapping node
pub type Mapping = IndexMap<String, Node>;

/// A literal leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) if s.is_empty() => write!(f, "\"\""),
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// The three node kinds
#[derive(Debug, Clone)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

/// A document node with an optional attached comment.
///
/// Comments are metadata: equality compares structure only.
#[derive(Debug, Clone)]
pub struct Node {
    pub value: Value,
    pub comment: Option<String>,
}

impl Node {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            comment: None,
        }
    }

    pub fn scalar(scalar: Scalar) -> Self {
        Self::new(Value::Scalar(scalar))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::scalar(Scalar::String(s.into()))
    }

    pub fn integer(i: i64) -> Self {
        Self::scalar(Scalar::Integer(i))
    }

    pub fn float(x: f64) -> Self {
        Self::scalar(Scalar::Float(x))
    }

    pub fn bool(b: bool) -> Self {
        Self::scalar(Scalar::Bool(b))
    }

    pub fn null() -> Self {
        Self::scalar(Scalar::Null)
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self::new(Value::Sequence(items))
    }

    pub fn mapping(entries: Mapping) -> Self {
        Self::new(Value::Mapping(entries))
    }

    /// An empty but present mapping
    pub fn empty_mapping() -> Self {
        Self::mapping(Mapping::new())
    }

    /// An empty but present sequence
    pub fn empty_sequence() -> Self {
        Self::sequence(Vec::new())
    }

    /// Build a mapping from pairs, keeping their order.
    ///
    /// A repeated key replaces the earlier value in its original position.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Node)>) -> Self {
        Self::mapping(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Attach a comment to this node
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match &self.value {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.value {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Look up a key if this node is a mapping
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// True for mappings and sequences with no children
    pub fn is_empty_container(&self) -> bool {
        match &self.value {
            Value::Mapping(m) => m.is_empty(),
            Value::Sequence(items) => items.is_empty(),
            Value::Scalar(_) => false,
        }
    }

    /// Pre-order walk over this node and every descendant, in insertion order
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Collect every attached comment in traversal order
    pub fn comments(&self) -> Vec<Comment> {
        self.walk()
            .filter_map(|(path, node)| {
                node.comment.as_ref().map(|text| Comment {
                    path,
                    text: text.clone(),
                })
            })
            .collect()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            // IndexMap equality ignores order; mappings here are ordered lists
            (Value::Mapping(a), Value::Mapping(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            _ => false,
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::scalar(scalar)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::string(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::string(s)
    }
}

/// A comment detached from its node, addressed by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub path: Path,
    pub text: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_comments() {
        let a = Node::from_pairs([("Name", Node::string("x").with_comment("String"))]);
        let b = Node::from_pairs([("Name", Node::string("x"))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_key_order() {
        let a = Node::from_pairs([("A", Node::integer(1)), ("B", Node::integer(2))]);
        let b = Node::from_pairs([("B", Node::integer(2)), ("A", Node::integer(1))]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_containers_are_distinct() {
        assert_ne!(Node::empty_mapping(), Node::empty_sequence());
        assert_ne!(Node::empty_mapping(), Node::null());
        assert!(Node::empty_mapping().is_empty_container());
        assert!(!Node::string("").is_empty_container());
    }

    #[test]
    fn test_from_pairs_preserves_order() {
        let node = Node::from_pairs([
            ("Zeta", Node::null()),
            ("Alpha", Node::null()),
            ("Mid", Node::null()),
        ]);
        let keys: Vec<&str> = node
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_comments_in_traversal_order() {
        let node = Node::from_pairs([
            ("A", Node::string("").with_comment("first")),
            (
                "B",
                Node::sequence(vec![Node::integer(0).with_comment("second")])
                    .with_comment("container"),
            ),
        ]);
        let texts: Vec<String> = node.comments().into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["first", "container", "second"]);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::String(String::new()).to_string(), "\"\"");
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::Null.to_string(), "null");
    }
}
