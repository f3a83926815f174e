//! Per-resource expansion state

use std::collections::HashSet;

use super::BuildMode;

/// State carried down one resource's expansion
#[derive(Debug, Clone)]
pub struct ExpansionContext {
    /// Completeness setting for this build
    pub mode: BuildMode,
    /// `(domain, type name)` pairs on the active expansion path (cycle detection)
    expanding: HashSet<(String, String)>,
    /// Number of recursive types cut short so far
    truncated: usize,
}

impl ExpansionContext {
    pub fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            expanding: HashSet::new(),
            truncated: 0,
        }
    }

    /// Check if a type is already being expanded higher up the path
    pub fn is_expanding(&self, domain: &str, name: &str) -> bool {
        self.expanding
            .contains(&(domain.to_string(), name.to_string()))
    }

    /// Mark a type as being expanded
    pub fn start_expanding(&mut self, domain: &str, name: &str) {
        self.expanding.insert((domain.to_string(), name.to_string()));
    }

    /// Mark a type as done expanding
    pub fn done_expanding(&mut self, domain: &str, name: &str) {
        self.expanding
            .remove(&(domain.to_string(), name.to_string()));
    }

    pub(crate) fn record_truncation(&mut self) {
        self.truncated += 1;
    }

    /// How many recursive placeholders this context produced
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Depth of the active expansion path
    pub fn depth(&self) -> usize {
        self.expanding.len()
    }
}
