//! Pre-order traversal over a node tree

use std::fmt;

use super::node::{Node, Value};

/// One step from a container to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "{}", k),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Location of a node relative to the root it was walked from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(pub Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the path is exactly one mapping key
    pub fn is_key(&self, key: &str) -> bool {
        matches!(self.0.as_slice(), [PathSegment::Key(k)] if k == key)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// Iterator yielding `(path, node)` for a node and all its descendants.
///
/// Parents come before children; siblings come in insertion order.
pub struct Walk<'a> {
    stack: Vec<(Path, &'a Node)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![(Path::root(), root)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Path, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        match &node.value {
            Value::Mapping(entries) => {
                for (key, child) in entries.iter().rev() {
                    self.stack
                        .push((path.child(PathSegment::Key(key.clone())), child));
                }
            }
            Value::Sequence(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    self.stack.push((path.child(PathSegment::Index(index)), child));
                }
            }
            Value::Scalar(_) => {}
        }
        Some((path, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_preorder_insertion_order() {
        let node = Node::from_pairs([
            ("B", Node::sequence(vec![Node::integer(1), Node::integer(2)])),
            ("A", Node::string("x")),
        ]);
        let paths: Vec<String> = node.walk().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, vec!["/", "/B", "/B/0", "/B/1", "/A"]);
    }

    #[test]
    fn test_path_is_key() {
        let path = Path::root().child(PathSegment::Key("DependsOn".to_string()));
        assert!(path.is_key("DependsOn"));
        assert!(!path.child(PathSegment::Index(0)).is_key("DependsOn"));
    }
}
