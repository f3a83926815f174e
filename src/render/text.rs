//! Indented text rendering of documents

use crate::document::{Document, Node, Value};

use super::config::{RenderConfig, SortOrder};

/// Render a document as an indented key/value tree
pub fn render_document(doc: &Document, config: &RenderConfig) -> String {
    node_lines(doc.root(), config).join("\n")
}

/// Lines for a node at relative indentation zero
fn node_lines(node: &Node, config: &RenderConfig) -> Vec<String> {
    match &node.value {
        Value::Scalar(scalar) => vec![with_comment(scalar.to_string(), node, config)],
        Value::Mapping(m) if m.is_empty() => vec![with_comment("{}".to_string(), node, config)],
        Value::Sequence(items) if items.is_empty() => {
            vec![with_comment("[]".to_string(), node, config)]
        }
        Value::Mapping(_) | Value::Sequence(_) => children_lines(node, config),
    }
}

/// Lines for the children of a non-empty container
fn children_lines(node: &Node, config: &RenderConfig) -> Vec<String> {
    let mut lines = Vec::new();
    match &node.value {
        Value::Mapping(entries) => {
            let mut entries: Vec<(&String, &Node)> = entries.iter().collect();
            if config.order == SortOrder::Sorted {
                entries.sort_by(|a, b| a.0.cmp(b.0));
            }
            for (key, child) in entries {
                if is_inline(child) {
                    let value = node_lines(child, config).concat();
                    lines.push(format!("{}: {}", key, value));
                } else {
                    lines.push(with_comment(format!("{}:", key), child, config));
                    let pad = config.pad(1);
                    lines.extend(
                        children_lines(child, config)
                            .into_iter()
                            .map(|line| format!("{}{}", pad, line)),
                    );
                }
            }
        }
        Value::Sequence(items) => {
            for item in items {
                let mut item_lines = if is_inline(item) {
                    node_lines(item, config)
                } else {
                    let mut inner = children_lines(item, config);
                    if let Some(first) = inner.first_mut() {
                        *first = with_comment(std::mem::take(first), item, config);
                    }
                    inner
                };
                prefix_item(&mut item_lines);
                lines.extend(item_lines);
            }
        }
        Value::Scalar(_) => {}
    }
    lines
}

/// Scalars and empty containers render on the same line as their key
fn is_inline(node: &Node) -> bool {
    match &node.value {
        Value::Scalar(_) => true,
        _ => node.is_empty_container(),
    }
}

/// Turn a block into a sequence item: `- ` on the first line, aligned after
pub(crate) fn prefix_item(lines: &mut [String]) {
    for (i, line) in lines.iter_mut().enumerate() {
        let prefix = if i == 0 { "- " } else { "  " };
        line.insert_str(0, prefix);
    }
}

fn with_comment(text: String, node: &Node, config: &RenderConfig) -> String {
    match (&node.comment, config.show_comments) {
        (Some(comment), true) => format!("{}  # {}", text, comment),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        Document::new(Node::from_pairs([
            ("Zeta", Node::string("z").with_comment("String, optional")),
            (
                "Alpha",
                Node::from_pairs([
                    ("List", Node::sequence(vec![Node::integer(1), Node::integer(2)])),
                    ("Empty", Node::empty_mapping()),
                ]),
            ),
            (
                "Items",
                Node::sequence(vec![Node::from_pairs([
                    ("Key", Node::string("")),
                    ("Value", Node::bool(true)),
                ])]),
            ),
        ]))
    }

    #[test]
    fn test_source_order() {
        let out = render_document(&sample(), &RenderConfig::default());
        let expected = "\
Zeta: z
Alpha:
  List:
    - 1
    - 2
  Empty: {}
Items:
  - Key: \"\"
    Value: true";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_sorted_order() {
        let config = RenderConfig::new().with_order(SortOrder::Sorted);
        let out = render_document(&sample(), &config);
        let expected = "\
Alpha:
  Empty: {}
  List:
    - 1
    - 2
Items:
  - Key: \"\"
    Value: true
Zeta: z";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_comments_and_indent() {
        let doc = Document::new(Node::from_pairs([(
            "Outer",
            Node::from_pairs([("Inner", Node::integer(0).with_comment("Integer, required"))])
                .with_comment("Shape, optional"),
        )]));
        let config = RenderConfig::new().with_comments(true).with_indent(4);
        let out = render_document(&doc, &config);
        assert_eq!(
            out,
            "Outer:  # Shape, optional\n    Inner: 0  # Integer, required"
        );
    }

    #[test]
    fn test_empty_sequence_and_scalar_root() {
        let doc = Document::new(Node::from_pairs([("Tags", Node::empty_sequence())]));
        assert_eq!(render_document(&doc, &RenderConfig::default()), "Tags: []");

        let scalar = Document::new(Node::string("only"));
        assert_eq!(render_document(&scalar, &RenderConfig::default()), "only");
    }
}
