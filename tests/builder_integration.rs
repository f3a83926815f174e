//! Integration tests for template building

use std::collections::BTreeSet;

use cfn_scaffold::builder::{DomainTypeOverride, OverrideSet, RECURSIVE_MARKER};
use cfn_scaffold::spec::{
    policy_registry, PrimitiveType, PropertyDef, PropertyKind, PropertyTypeDef, ResourceTypeDef,
    SpecError, SpecRegistry, GENERAL_DOMAIN, POLICY_DOMAIN,
};
use cfn_scaffold::{
    build, render_document, BuildMode, Document, Node, RenderConfig, SpecCatalog, TemplateBuilder,
};
use pretty_assertions::assert_eq;

fn keys(node: &Node) -> Vec<&str> {
    node.as_mapping()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn properties<'a>(doc: &'a Document, logical_name: &str) -> &'a Node {
    doc.section("Resources")
        .and_then(|r| r.get(logical_name))
        .and_then(|r| r.get("Properties"))
        .expect("Resource should have properties")
}

fn paths(doc: &Document) -> BTreeSet<String> {
    doc.root()
        .walk()
        .map(|(path, _)| path.to_string())
        .collect()
}

#[test]
fn test_bare_paths_are_subset_of_full() {
    let catalog = SpecCatalog::builtin();
    let builder = TemplateBuilder::new(&catalog);

    for type_name in catalog.list_resource_type_names(GENERAL_DOMAIN) {
        let bare = builder
            .build(&[type_name.as_str()], BuildMode::Bare)
            .expect("Builtin types should build");
        let full = builder
            .build(&[type_name.as_str()], BuildMode::Full)
            .expect("Builtin types should build");

        let bare_paths = paths(&bare.document);
        let full_paths = paths(&full.document);
        assert!(
            bare_paths.is_subset(&full_paths),
            "{}: bare output has paths missing from full output",
            type_name
        );
    }
}

#[test]
fn test_bare_bucket_json() {
    let template = build(&["AWS::S3::Bucket"], BuildMode::Bare).expect("Bucket should build");
    let json = template
        .document
        .to_json_string_pretty()
        .expect("Document should serialize");

    let expected = r#"{
  "AWSTemplateFormatVersion": "2010-09-09",
  "Resources": {
    "AWSS3Bucket": {
      "Type": "AWS::S3::Bucket",
      "Properties": {}
    }
  }
}"#;
    assert_eq!(json, expected);
}

#[test]
fn test_policy_document_uses_policy_domain() {
    let template = build(&["AWS::IAM::Policy"], BuildMode::Full).expect("Policy should build");
    let props = properties(&template.document, "AWSIAMPolicy");

    // The general catalog types PolicyDocument as free-form JSON
    let document = props.get("PolicyDocument").expect("PolicyDocument");
    assert_eq!(keys(document), vec!["Id", "Statement", "Version"]);
    assert_eq!(
        document.comment.as_deref(),
        Some("Policy document (iam), required")
    );

    let statement = document
        .get("Statement")
        .and_then(Node::as_sequence)
        .and_then(|items| items.first())
        .expect("Statement list should hold one item");
    assert!(keys(statement).contains(&"Effect"));
    assert!(keys(statement).contains(&"Principal"));
}

#[test]
fn test_bare_policy_document() {
    let template = build(&["AWS::SQS::QueuePolicy"], BuildMode::Bare).expect("Should build");
    let props = properties(&template.document, "AWSSQSQueuePolicy");
    let document = props.get("PolicyDocument").expect("PolicyDocument");

    let expected = Node::from_pairs([
        (
            "Statement",
            Node::sequence(vec![Node::from_pairs([("Effect", Node::string(""))])]),
        ),
        ("Version", Node::string("")),
    ]);
    assert_eq!(document, &expected);
}

#[test]
fn test_inline_role_policy_is_overridden() {
    let template = build(&["AWS::IAM::Role"], BuildMode::Full).expect("Role should build");
    let props = properties(&template.document, "AWSIAMRole");

    let inline = props
        .get("Policies")
        .and_then(Node::as_sequence)
        .and_then(|items| items.first())
        .and_then(|policy| policy.get("PolicyDocument"))
        .expect("Inline policy document");
    assert_eq!(keys(inline), vec!["Id", "Statement", "Version"]);

    let assume = props.get("AssumeRolePolicyDocument").expect("Trust policy");
    assert_eq!(keys(assume), vec!["Id", "Statement", "Version"]);
}

#[test]
fn test_override_when_general_domain_lacks_type() {
    let general = SpecRegistry::new(GENERAL_DOMAIN).with_resource_type(ResourceTypeDef::new(
        "Custom::Thing",
        vec![PropertyDef::required("Document", PropertyKind::nested("Missing"))],
    ));
    let catalog = SpecCatalog::new()
        .with_registry(general)
        .with_registry(policy_registry());

    let err = TemplateBuilder::new(&catalog)
        .build(&["Custom::Thing"], BuildMode::Bare)
        .expect_err("Missing nested type should fail");
    assert!(matches!(err, SpecError::UnknownType { ref name, .. } if name == "Missing"));

    let template = TemplateBuilder::new(&catalog)
        .with_override("Custom::Thing", "Document", DomainTypeOverride::policy())
        .build(&["Custom::Thing"], BuildMode::Bare)
        .expect("Override should supply the type");
    let props = properties(&template.document, "CustomThing");
    assert_eq!(keys(props.get("Document").expect("Document")), vec!["Statement", "Version"]);
}

#[test]
fn test_override_into_other_domain_type() {
    let template = TemplateBuilder::new(&SpecCatalog::builtin())
        .with_override(
            "AWS::SQS::Queue",
            "RedrivePolicy",
            DomainTypeOverride::new(POLICY_DOMAIN, "Principal"),
        )
        .build(&["AWS::SQS::Queue"], BuildMode::Full)
        .expect("Queue should build");
    let props = properties(&template.document, "AWSSQSQueue");
    assert_eq!(
        keys(props.get("RedrivePolicy").expect("RedrivePolicy")),
        vec!["AWS", "CanonicalUser", "Federated", "Service"]
    );
}

#[test]
fn test_recursive_property_type() {
    let general = SpecRegistry::new(GENERAL_DOMAIN)
        .with_resource_type(ResourceTypeDef::new(
            "Custom::Tree",
            vec![PropertyDef::required("Root", PropertyKind::nested("Custom::Tree.Branch"))],
        ))
        .with_property_type(PropertyTypeDef::new(
            "Custom::Tree.Branch",
            vec![
                PropertyDef::required("Label", PropertyKind::Scalar(PrimitiveType::String)),
                PropertyDef::optional(
                    "Children",
                    PropertyKind::list_of(PropertyKind::nested("Custom::Tree.Branch")),
                ),
            ],
        ));
    let catalog = SpecCatalog::new().with_registry(general);

    let template = TemplateBuilder::new(&catalog)
        .build(&["Custom::Tree"], BuildMode::Full)
        .expect("Recursive type should terminate");
    let markers = template
        .comments
        .iter()
        .filter(|c| c.text == RECURSIVE_MARKER)
        .count();
    assert_eq!(markers, 1);
}

#[test]
fn test_comments_are_listed_in_traversal_order() {
    let template = build(&["AWS::IAM::Policy"], BuildMode::Bare).expect("Policy should build");
    let comments: Vec<String> = template.comments.iter().map(|c| c.to_string()).collect();
    assert_eq!(
        comments,
        vec![
            "/Resources/AWSIAMPolicy/Properties/PolicyDocument: Policy document (iam), required",
            "/Resources/AWSIAMPolicy/Properties/PolicyDocument/Statement: List of Statement (repeatable), required",
            "/Resources/AWSIAMPolicy/Properties/PolicyDocument/Statement/0/Effect: String, required",
            "/Resources/AWSIAMPolicy/Properties/PolicyDocument/Version: String, required",
            "/Resources/AWSIAMPolicy/Properties/PolicyName: String, required",
        ]
    );
}

#[test]
fn test_rendered_template() {
    let template = build(&["AWS::SNS::TopicPolicy"], BuildMode::Bare).expect("Should build");
    let out = render_document(&template.document, &RenderConfig::new().with_comments(true));

    insta::assert_snapshot!(out, @r#"
    AWSTemplateFormatVersion: 2010-09-09
    Resources:
      AWSSNSTopicPolicy:
        Type: AWS::SNS::TopicPolicy
        Properties:
          PolicyDocument:  # Policy document (iam), required
            Statement:  # List of Statement (repeatable), required
              - Effect: ""  # String, required
            Version: ""  # String, required
          Topics:  # List of String (repeatable), required
            - ""
    "#);
}

#[test]
fn test_json_round_trip_of_built_template() {
    let template = build(&["AWS::KMS::Key", "AWS::KMS::Key"], BuildMode::Full)
        .expect("Key should build");
    let json = template
        .document
        .to_json_string_pretty()
        .expect("Document should serialize");
    let parsed = Document::from_json_str(&json).expect("Output should parse");

    // Comments are not part of equality
    assert_eq!(parsed, template.document);
    let resources = parsed.root().get("Resources").expect("Resources section");
    assert_eq!(keys(resources), vec!["AWSKMSKey", "AWSKMSKey2"]);
}

#[test]
fn test_primary_domain_selects_registry() {
    let custom = SpecRegistry::new("custom").with_resource_type(ResourceTypeDef::new(
        "Custom::Widget",
        vec![PropertyDef::required("Size", PropertyKind::Scalar(PrimitiveType::Integer))],
    ));
    let catalog = SpecCatalog::builtin().with_registry(custom);
    let builder = TemplateBuilder::new(&catalog).with_primary_domain("custom");

    assert!(builder.catalog().registry("custom").is_some());
    assert_eq!(builder.overrides().len(), OverrideSet::with_policy_defaults().len());

    let template = builder
        .build(&["Custom::Widget"], BuildMode::Bare)
        .expect("Custom domain type should build");
    let props = properties(&template.document, "CustomWidget");
    assert_eq!(props.get("Size"), Some(&Node::integer(0)));

    // General types are not visible from the custom domain
    let err = builder
        .build(&["AWS::S3::Bucket"], BuildMode::Bare)
        .expect_err("Bucket is not in the custom domain");
    assert!(matches!(err, SpecError::UnknownType { ref domain, .. } if domain == "custom"));
}
