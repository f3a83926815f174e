//! cfn-scaffold - Template synthesis and dependency analysis
//!
//! This library builds skeleton infrastructure templates from resource
//! specification catalogs and extracts the dependency graph of existing
//! templates.
//!
//! # Example
//!
//! ```rust
//! use cfn_scaffold::{build, BuildMode};
//!
//! let template = build(&["AWS::S3::Bucket"], BuildMode::Bare).unwrap();
//! let json = template.document.to_json_string_pretty().unwrap();
//! assert!(json.contains("AWSTemplateFormatVersion"));
//! ```

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod render;
pub mod spec;

pub use builder::{BuildMode, Template, TemplateBuilder};
pub use config::{Config, ConfigError};
pub use document::{Document, Node};
pub use error::Error;
pub use graph::{extract, DependencyGraph, EdgeTag, Section};
pub use render::{render, render_document, render_dot, render_graph, RenderConfig, SortOrder};
pub use spec::{SpecCatalog, SpecError};

/// Build a template from the embedded catalogs with the default overrides
///
/// # Example
///
/// ```rust
/// use cfn_scaffold::{build, BuildMode};
///
/// let template = build(&["AWS::SQS::Queue", "AWS::SQS::Queue"], BuildMode::Full).unwrap();
/// let resources = template.document.section("Resources").unwrap();
/// assert!(resources.contains_key("AWSSQSQueue"));
/// assert!(resources.contains_key("AWSSQSQueue2"));
/// ```
pub fn build<S: AsRef<str>>(types: &[S], mode: BuildMode) -> Result<Template, SpecError> {
    let catalog = SpecCatalog::builtin();
    TemplateBuilder::new(&catalog).build(types, mode)
}

/// Render the dependency tree of a JSON template
///
/// # Example
///
/// ```rust
/// use cfn_scaffold::{dependency_tree, RenderConfig};
///
/// let tree = dependency_tree(
///     r#"{"Resources": {"Topic": {"Type": "AWS::SNS::Topic"},
///         "Sub": {"Type": "AWS::SNS::Subscription", "Properties": {"TopicArn": {"Ref": "Topic"}}}}}"#,
///     &RenderConfig::default(),
/// )
/// .unwrap();
/// assert!(tree.contains("- Topic"));
/// ```
pub fn dependency_tree(source: &str, config: &RenderConfig) -> Result<String, Error> {
    let doc = Document::from_json_str(source)?;
    let graph = extract(&doc);
    Ok(render_graph(&graph, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_unknown_type() {
        let result = build(&["AWS::Nope::Nothing"], BuildMode::Full);
        assert!(matches!(result, Err(SpecError::UnknownType { .. })));
    }

    #[test]
    fn test_dependency_tree() {
        let tree = dependency_tree(
            r#"{
                "Parameters": {"BucketName": {"Type": "String"}},
                "Resources": {"Bucket1": {
                    "Type": "AWS::S3::Bucket",
                    "DependsOn": "BucketName",
                    "Properties": {"BucketName": {"Ref": "BucketName"}}
                }}
            }"#,
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(
            tree,
            "Resources:\n  Bucket1:\n    DependsOn:\n      Parameters:\n        - BucketName"
        );
    }

    #[test]
    fn test_dependency_tree_rejects_invalid_json() {
        let result = dependency_tree("{not json", &RenderConfig::default());
        assert!(matches!(result, Err(Error::Template(_))));
    }

    #[test]
    fn test_built_template_has_no_edges() {
        let template = build(&["AWS::SNS::Topic"], BuildMode::Full).unwrap();
        let graph = extract(&template.document);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.section_of("AWSSNSTopic"), Some(Section::Resources));
    }
}
