//! Conversion between document nodes and `serde_json` values
//!
//! Key order survives in both directions (`serde_json` is built with
//! `preserve_order`). Comments have no JSON representation and are dropped.

use serde_json::{Map, Number};

use super::node::{Node, Scalar, Value};

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::null(),
            serde_json::Value::Bool(b) => Node::bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::integer(i)
                } else if let Some(u) = n.as_u64() {
                    Node::scalar(Scalar::Unsigned(u))
                } else {
                    Node::float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Node::string(s),
            serde_json::Value::Array(items) => {
                Node::sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(entries) => Node::mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        match &node.value {
            Value::Scalar(Scalar::Null) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Scalar(Scalar::Integer(i)) => serde_json::Value::Number((*i).into()),
            Value::Scalar(Scalar::Unsigned(u)) => serde_json::Value::Number((*u).into()),
            Value::Scalar(Scalar::Float(x)) => Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Scalar(Scalar::String(s)) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(entries) => {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k.clone(), serde_json::Value::from(v));
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
