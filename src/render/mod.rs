//! Text renderers for documents and dependency graphs
//!
//! Both outputs are indented trees whose sibling order is either the
//! source order or lexicographic, as chosen by [`RenderConfig`].

pub mod config;
pub mod dot;
pub mod text;
pub mod tree;

pub use config::{EdgeLabels, RenderConfig, SortOrder, DEPENDS_ON_LABEL, USED_BY_LABEL};
pub use dot::render_dot;
pub use text::render_document;
pub use tree::{render_graph, UNRESOLVED_LABEL};

use crate::document::Document;
use crate::graph::DependencyGraph;

/// Anything the tree renderer accepts
#[derive(Debug, Clone, Copy)]
pub enum RenderTarget<'a> {
    Document(&'a Document),
    Graph(&'a DependencyGraph),
}

impl<'a> From<&'a Document> for RenderTarget<'a> {
    fn from(doc: &'a Document) -> Self {
        RenderTarget::Document(doc)
    }
}

impl<'a> From<&'a DependencyGraph> for RenderTarget<'a> {
    fn from(graph: &'a DependencyGraph) -> Self {
        RenderTarget::Graph(graph)
    }
}

/// Render a document or a dependency graph as an indented tree
pub fn render<'a>(target: impl Into<RenderTarget<'a>>, config: &RenderConfig) -> String {
    match target.into() {
        RenderTarget::Document(doc) => render_document(doc, config),
        RenderTarget::Graph(graph) => render_graph(graph, config),
    }
}
