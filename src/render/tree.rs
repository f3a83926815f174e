//! Dependency tree rendering
//!
//! ```text
//! Resources:
//!   Bucket1:
//!     DependsOn:
//!       Parameters:
//!         - BucketName
//! ```
//!
//! Each target expands into its own dependencies. A name already on the
//! current render path, or already expanded under the same top-level entry,
//! is printed with the cycle marker and not expanded again.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::graph::{DependencyGraph, EdgeTag, Section};

use super::config::{RenderConfig, SortOrder, USED_BY_LABEL};
use super::text::prefix_item;

/// Heading for targets that are not declared in the template
pub const UNRESOLVED_LABEL: &str = "Unresolved";

/// Names seen while rendering one top-level entry
#[derive(Default)]
struct Visited<'g> {
    /// Targets on the active path
    path: HashSet<&'g str>,
    /// Targets whose dependencies were already printed
    displayed: HashSet<&'g str>,
}

/// Render the dependency tree of every node with outgoing edges
pub fn render_graph(graph: &DependencyGraph, config: &RenderConfig) -> String {
    let mut lines = Vec::new();

    for section in Section::ALL {
        let mut names: Vec<&str> = graph.nodes_in(section).collect();
        if config.order == SortOrder::Sorted {
            names.sort_unstable();
        }

        let mut section_lines = Vec::new();
        for name in names {
            let mut visited = Visited::default();
            visited.path.insert(name);
            let mut body = dependency_lines(graph, name, config, &mut visited);
            if config.show_dependents {
                body.extend(dependent_lines(graph, name, config));
            }

            if body.is_empty() {
                if config.show_all {
                    section_lines.push(name.to_string());
                }
                continue;
            }
            section_lines.push(format!("{}:", name));
            section_lines.extend(indented(body, config, 1));
        }

        if !section_lines.is_empty() {
            lines.push(format!("{}:", section));
            lines.extend(indented(section_lines, config, 1));
        }
    }

    lines.join("\n")
}

/// Grouped outgoing edges of `name`, recursing into each target
fn dependency_lines<'g>(
    graph: &'g DependencyGraph,
    name: &'g str,
    config: &RenderConfig,
    visited: &mut Visited<'g>,
) -> Vec<String> {
    let mut lines = Vec::new();

    for (label, by_section) in outgoing_groups(graph, name, config) {
        lines.push(format!("{}:", label));
        for (heading, targets) in by_section {
            lines.push(format!("{}{}:", config.pad(1), heading));
            for target in targets {
                let mut item = target_lines(graph, target, config, visited);
                prefix_item(&mut item);
                lines.extend(indented(item, config, 2));
            }
        }
    }

    lines
}

fn target_lines<'g>(
    graph: &'g DependencyGraph,
    target: &'g str,
    config: &RenderConfig,
    visited: &mut Visited<'g>,
) -> Vec<String> {
    let repeated = visited.path.contains(target)
        || (visited.displayed.contains(target) && graph.outgoing(target).next().is_some());
    if repeated {
        return vec![format!("{}{}", target, config.cycle_marker)];
    }

    visited.path.insert(target);
    let nested = dependency_lines(graph, target, config, visited);
    visited.path.remove(target);

    if nested.is_empty() {
        return vec![target.to_string()];
    }
    visited.displayed.insert(target);
    let mut lines = vec![format!("{}:", target)];
    lines.extend(indented(nested, config, 1));
    lines
}

/// `UsedBy` group listing sources of incoming edges; never recursive
fn dependent_lines(graph: &DependencyGraph, name: &str, config: &RenderConfig) -> Vec<String> {
    let mut by_section: IndexMap<Option<Section>, IndexSet<&str>> = IndexMap::new();
    for edge in graph.incoming(name) {
        by_section
            .entry(graph.section_of(&edge.source))
            .or_default()
            .insert(edge.source.as_str());
    }
    if by_section.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("{}:", USED_BY_LABEL)];
    for (heading, sources) in ordered_sections(by_section, config) {
        lines.push(format!("{}{}:", config.pad(1), heading));
        for source in sources {
            lines.push(format!("{}- {}", config.pad(2), source));
        }
    }
    lines
}

type SectionGroups<'g> = Vec<(&'static str, Vec<&'g str>)>;

/// Outgoing edges grouped by tag label (in tag order), then target section
fn outgoing_groups<'g, 'c>(
    graph: &'g DependencyGraph,
    name: &'g str,
    config: &'c RenderConfig,
) -> Vec<(&'c str, SectionGroups<'g>)> {
    let mut groups: IndexMap<&'c str, IndexMap<Option<Section>, IndexSet<&'g str>>> =
        IndexMap::new();
    for tag in EdgeTag::ALL {
        for edge in graph.outgoing(name).filter(|e| e.tag == tag) {
            groups
                .entry(config.labels.get(tag))
                .or_default()
                .entry(graph.section_of(&edge.target))
                .or_default()
                .insert(edge.target.as_str());
        }
    }

    groups
        .into_iter()
        .map(|(label, by_section)| (label, ordered_sections(by_section, config)))
        .collect()
}

/// Declared sections in template order, unresolved targets last
fn ordered_sections<'g>(
    by_section: IndexMap<Option<Section>, IndexSet<&'g str>>,
    config: &RenderConfig,
) -> SectionGroups<'g> {
    let mut sections: Vec<(Option<Section>, IndexSet<&'g str>)> = by_section.into_iter().collect();
    sections.sort_by_key(|(section, _)| (section.is_none(), *section));

    sections
        .into_iter()
        .map(|(section, names)| {
            let heading = section.map_or(UNRESOLVED_LABEL, |s| s.as_str());
            let mut names: Vec<&str> = names.into_iter().collect();
            if config.order == SortOrder::Sorted {
                names.sort_unstable();
            }
            (heading, names)
        })
        .collect()
}

fn indented(lines: Vec<String>, config: &RenderConfig, levels: usize) -> Vec<String> {
    let pad = config.pad(levels);
    lines
        .into_iter()
        .map(|line| format!("{}{}", pad, line))
        .collect()
}
