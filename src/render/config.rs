//! Configuration for tree rendering

use serde::Deserialize;

use crate::graph::EdgeTag;

/// Sibling ordering for rendered output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Document insertion order / edge discovery order
    #[default]
    Source,
    /// Lexicographic
    Sorted,
}

/// Group label used for each edge tag in dependency trees.
///
/// Tags sharing a label are merged into one group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EdgeLabels {
    pub explicit: String,
    pub reference: String,
    pub attribute: String,
    pub condition: String,
}

impl Default for EdgeLabels {
    fn default() -> Self {
        Self {
            explicit: DEPENDS_ON_LABEL.to_string(),
            reference: DEPENDS_ON_LABEL.to_string(),
            attribute: DEPENDS_ON_LABEL.to_string(),
            condition: DEPENDS_ON_LABEL.to_string(),
        }
    }
}

impl EdgeLabels {
    pub fn get(&self, tag: EdgeTag) -> &str {
        match tag {
            EdgeTag::Explicit => &self.explicit,
            EdgeTag::Reference => &self.reference,
            EdgeTag::Attribute => &self.attribute,
            EdgeTag::Condition => &self.condition,
        }
    }

    pub fn set(&mut self, tag: EdgeTag, label: impl Into<String>) {
        let label = label.into();
        match tag {
            EdgeTag::Explicit => self.explicit = label,
            EdgeTag::Reference => self.reference = label,
            EdgeTag::Attribute => self.attribute = label,
            EdgeTag::Condition => self.condition = label,
        }
    }
}

/// Default group label for outgoing edges
pub const DEPENDS_ON_LABEL: &str = "DependsOn";

/// Group label for incoming edges
pub const USED_BY_LABEL: &str = "UsedBy";

/// Options for document and dependency tree rendering
///
/// Deserializes from the `[render]` table of a configuration file; missing
/// keys keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Sibling ordering
    pub order: SortOrder,

    /// Spaces per nesting level
    pub indent: usize,

    /// Append node comments as `# ...` (documents only)
    pub show_comments: bool,

    /// List graph nodes that have no outgoing edges
    pub show_all: bool,

    /// Add a `UsedBy` group listing incoming edges
    pub show_dependents: bool,

    /// Appended to a name revisited on the current render path
    pub cycle_marker: String,

    /// Group label per edge tag
    pub labels: EdgeLabels,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::Source,
            indent: 2,
            show_comments: false,
            show_all: false,
            show_dependents: false,
            cycle_marker: " (*)".to_string(),
            labels: EdgeLabels::default(),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sibling ordering
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable comment output
    pub fn with_comments(mut self, show: bool) -> Self {
        self.show_comments = show;
        self
    }

    /// Enable or disable listing nodes without dependencies
    pub fn with_show_all(mut self, show: bool) -> Self {
        self.show_all = show;
        self
    }

    /// Enable or disable the `UsedBy` group
    pub fn with_dependents(mut self, show: bool) -> Self {
        self.show_dependents = show;
        self
    }

    /// Set the marker appended to revisited names
    pub fn with_cycle_marker(mut self, marker: impl Into<String>) -> Self {
        self.cycle_marker = marker.into();
        self
    }

    /// Set the group label for one edge tag
    pub fn with_label(mut self, tag: EdgeTag, label: impl Into<String>) -> Self {
        self.labels.set(tag, label);
        self
    }

    pub(crate) fn pad(&self, levels: usize) -> String {
        " ".repeat(self.indent * levels)
    }
}
