//! Dependency graph between template entries

use std::fmt;

use indexmap::{IndexMap, IndexSet};

/// Top-level template section an entry is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Parameters,
    Conditions,
    Resources,
    Outputs,
}

impl Section {
    /// All sections in template order
    pub const ALL: [Section; 4] = [
        Section::Parameters,
        Section::Conditions,
        Section::Resources,
        Section::Outputs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Parameters => "Parameters",
            Section::Conditions => "Conditions",
            Section::Resources => "Resources",
            Section::Outputs => "Outputs",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of construct produced an edge.
///
/// Variant order is the order edge groups are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeTag {
    /// `DependsOn`
    Explicit,
    /// `Ref` or `${Name}` in `Fn::Sub`
    Reference,
    /// `Fn::GetAtt` or `${Name.Attr}` in `Fn::Sub`
    Attribute,
    /// `Condition` keys, condition functions and `Fn::If`
    Condition,
}

impl EdgeTag {
    pub const ALL: [EdgeTag; 4] = [
        EdgeTag::Explicit,
        EdgeTag::Reference,
        EdgeTag::Attribute,
        EdgeTag::Condition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeTag::Explicit => "explicit",
            EdgeTag::Reference => "reference",
            EdgeTag::Attribute => "attribute",
            EdgeTag::Condition => "condition",
        }
    }
}

impl fmt::Display for EdgeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, tagged edge: `source` depends on `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub tag: EdgeTag,
}

/// Named template entries and the tagged edges between them.
///
/// Nodes and edges keep the order they were discovered in. An edge may
/// target a name with no node (a dangling edge) and may point back at its
/// own source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    nodes: IndexMap<String, Section>,
    edges: IndexSet<Edge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; a name already present keeps its first section
    pub fn add_node(&mut self, name: impl Into<String>, section: Section) {
        self.nodes.entry(name.into()).or_insert(section);
    }

    /// Add an edge. Returns false if an identical edge already exists.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        tag: EdgeTag,
    ) -> bool {
        self.edges.insert(Edge {
            source: source.into(),
            target: target.into(),
            tag,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn section_of(&self, name: &str) -> Option<Section> {
        self.nodes.get(name).copied()
    }

    /// `(name, section)` pairs in discovery order
    pub fn nodes(&self) -> impl Iterator<Item = (&str, Section)> {
        self.nodes.iter().map(|(n, s)| (n.as_str(), *s))
    }

    /// Node names declared in one section, in discovery order
    pub fn nodes_in(&self, section: Section) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(move |(_, s)| **s == section)
            .map(|(n, _)| n.as_str())
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn outgoing<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == name)
    }

    pub fn incoming<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == name)
    }

    /// Edges whose target is not a node of this graph
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| !self.nodes.contains_key(&e.target))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
