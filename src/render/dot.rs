//! Graphviz output for dependency graphs

use crate::graph::{DependencyGraph, Section};

use super::config::{RenderConfig, SortOrder};

fn shape(section: Section) -> &'static str {
    match section {
        Section::Parameters => "parallelogram",
        Section::Conditions => "diamond",
        Section::Resources => "box",
        Section::Outputs => "note",
    }
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render a graph as a Graphviz `digraph`.
///
/// Nodes are shaped by section and dangling targets are drawn dashed. Edges
/// carry the configured label of their tag.
pub fn render_dot(graph: &DependencyGraph, config: &RenderConfig) -> String {
    let mut nodes: Vec<(&str, Section)> = graph.nodes().collect();
    let mut edges: Vec<_> = graph.edges().collect();
    if config.order == SortOrder::Sorted {
        nodes.sort_by(|a, b| a.0.cmp(b.0));
        edges.sort_by(|a, b| {
            (&a.source, &a.target, a.tag).cmp(&(&b.source, &b.target, b.tag))
        });
    }

    let mut dot = String::from("digraph dependencies {\n");
    dot.push_str("  rankdir=LR;\n");

    for (name, section) in nodes {
        let connected =
            graph.outgoing(name).next().is_some() || graph.incoming(name).next().is_some();
        if !connected && !config.show_all {
            continue;
        }
        dot.push_str(&format!("  {} [shape={}];\n", quote(name), shape(section)));
    }

    let mut dangling: Vec<&str> = Vec::new();
    for edge in graph.dangling_edges() {
        if !dangling.contains(&edge.target.as_str()) {
            dangling.push(&edge.target);
        }
    }
    for name in dangling {
        dot.push_str(&format!("  {} [shape=box, style=dashed];\n", quote(name)));
    }

    for edge in edges {
        dot.push_str(&format!(
            "  {} -> {} [label={}];\n",
            quote(&edge.source),
            quote(&edge.target),
            quote(config.labels.get(edge.tag))
        ));
    }

    dot.push('}');
    dot
}
