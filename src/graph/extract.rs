//! Dependency extraction from template documents

use tracing::debug;

use crate::document::{Document, Node};

use super::types::{DependencyGraph, EdgeTag, Section};

/// Build the dependency graph of a template.
///
/// Total over any document: sections that are missing or not mappings are
/// skipped, and references to unknown names are kept as dangling edges.
pub fn extract(doc: &Document) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for section in Section::ALL {
        if let Some(entries) = doc.section(section.as_str()) {
            for name in entries.keys() {
                graph.add_node(name.as_str(), section);
            }
        }
    }

    for section in Section::ALL {
        if let Some(entries) = doc.section(section.as_str()) {
            for (name, entry) in entries {
                collect_edges(section, name, entry, &mut graph);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "extracted dependency graph"
    );
    graph
}

fn collect_edges(section: Section, source: &str, entry: &Node, graph: &mut DependencyGraph) {
    let entry_level_keys = matches!(section, Section::Resources | Section::Outputs);

    for (path, node) in entry.walk() {
        if entry_level_keys && path.is_key("DependsOn") {
            for target in string_list(node) {
                graph.add_edge(source, target, EdgeTag::Explicit);
            }
            continue;
        }
        if entry_level_keys && path.is_key("Condition") {
            if let Some(target) = node.as_str() {
                graph.add_edge(source, target, EdgeTag::Condition);
            }
            continue;
        }

        let Some((function, argument)) = single_entry(node) else {
            continue;
        };
        match function {
            "Ref" => {
                if let Some(target) = argument.as_str().filter(|t| !is_pseudo_parameter(t)) {
                    graph.add_edge(source, target, EdgeTag::Reference);
                }
            }
            "Fn::GetAtt" => {
                if let Some(target) = get_att_target(argument) {
                    graph.add_edge(source, target, EdgeTag::Attribute);
                }
            }
            "Fn::Sub" => {
                for (target, tag) in sub_targets(argument) {
                    graph.add_edge(source, target, tag);
                }
            }
            "Fn::If" => {
                let condition = argument
                    .as_sequence()
                    .and_then(|items| items.first())
                    .and_then(Node::as_str);
                if let Some(target) = condition {
                    graph.add_edge(source, target, EdgeTag::Condition);
                }
            }
            // Inside a condition expression, not a resource property
            "Condition" if section == Section::Conditions => {
                if let Some(target) = argument.as_str() {
                    graph.add_edge(source, target, EdgeTag::Condition);
                }
            }
            _ => {}
        }
    }
}

/// The key and value of a mapping with exactly one entry
fn single_entry(node: &Node) -> Option<(&str, &Node)> {
    let mapping = node.as_mapping()?;
    if mapping.len() != 1 {
        return None;
    }
    mapping.iter().next().map(|(k, v)| (k.as_str(), v))
}

/// A string or a sequence of strings
fn string_list(node: &Node) -> Vec<&str> {
    match node.as_sequence() {
        Some(items) => items.iter().filter_map(Node::as_str).collect(),
        None => node.as_str().into_iter().collect(),
    }
}

fn is_pseudo_parameter(name: &str) -> bool {
    name.starts_with("AWS::")
}

/// `["Name", "Attr"]` or `"Name.Attr"`
fn get_att_target(argument: &Node) -> Option<&str> {
    if let Some(items) = argument.as_sequence() {
        return items.first().and_then(Node::as_str);
    }
    argument
        .as_str()
        .map(|s| s.split_once('.').map_or(s, |(name, _)| name))
}

/// Names referenced by `${...}` placeholders of a `Fn::Sub` argument.
///
/// The list form's variable map shadows names; `${!Literal}` is an escape.
fn sub_targets(argument: &Node) -> Vec<(String, EdgeTag)> {
    let (template, variables) = match argument.as_sequence() {
        Some(items) => (
            items.first().and_then(Node::as_str),
            items.get(1).and_then(Node::as_mapping),
        ),
        None => (argument.as_str(), None),
    };
    let Some(template) = template else {
        return Vec::new();
    };

    let mut targets = Vec::new();
    for placeholder in sub_placeholders(template) {
        let (name, tag) = match placeholder.split_once('.') {
            Some((name, _)) => (name, EdgeTag::Attribute),
            None => (placeholder, EdgeTag::Reference),
        };
        if is_pseudo_parameter(name) || variables.is_some_and(|v| v.contains_key(name)) {
            continue;
        }
        targets.push((name.to_string(), tag));
    }
    targets
}

fn sub_placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let inner = after[..end].trim();
        if !inner.starts_with('!') && !inner.is_empty() {
            found.push(inner);
        }
        rest = &after[end + 1..];
    }
    found
}
