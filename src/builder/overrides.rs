//! Per-property expansion strategies
//!
//! The generic builder expands every property from its own catalog entry.
//! An override replaces that for one `(owner type, property)` pair; owners
//! are resource type names or, for properties of nested shapes, property
//! type names.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::document::Node;
use crate::spec::{SpecError, TypeRef, POLICY_DOMAIN};

use super::context::ExpansionContext;
use super::template::TemplateBuilder;

/// Name of the policy document shape in the policy domain
pub const POLICY_TYPE: &str = "Policy";

/// Properties sourced from the policy domain by default
const POLICY_PROPERTIES: &[(&str, &str)] = &[
    ("AWS::IAM::Policy", "PolicyDocument"),
    ("AWS::IAM::ManagedPolicy", "PolicyDocument"),
    ("AWS::IAM::Role", "AssumeRolePolicyDocument"),
    ("AWS::IAM::Role.Policy", "PolicyDocument"),
    ("AWS::IAM::User.Policy", "PolicyDocument"),
    ("AWS::IAM::Group.Policy", "PolicyDocument"),
    ("AWS::S3::BucketPolicy", "PolicyDocument"),
    ("AWS::SQS::QueuePolicy", "PolicyDocument"),
    ("AWS::SNS::TopicPolicy", "PolicyDocument"),
    ("AWS::KMS::Key", "KeyPolicy"),
];

/// Custom expansion for a single property
pub trait PropertyOverride: Send + Sync {
    /// Produce the property's value node
    fn expand(
        &self,
        builder: &TemplateBuilder<'_>,
        ctx: &mut ExpansionContext,
    ) -> Result<Node, SpecError>;

    /// Comment attached when the produced node carries none
    fn describe(&self) -> String;
}

/// Expand a property as a named type from a specific domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTypeOverride {
    pub domain: String,
    pub type_name: String,
}

impl DomainTypeOverride {
    pub fn new(domain: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            type_name: type_name.into(),
        }
    }

    /// The policy document shape
    pub fn policy() -> Self {
        Self::new(POLICY_DOMAIN, POLICY_TYPE)
    }
}

impl PropertyOverride for DomainTypeOverride {
    fn expand(
        &self,
        builder: &TemplateBuilder<'_>,
        ctx: &mut ExpansionContext,
    ) -> Result<Node, SpecError> {
        let type_ref = TypeRef::in_domain(self.domain.clone(), self.type_name.clone());
        builder.expand_type(&type_ref, &self.domain, ctx)
    }

    fn describe(&self) -> String {
        format!("{} document ({})", self.type_name, self.domain)
    }
}

/// Overrides keyed by `(owner type, property name)`
#[derive(Clone, Default)]
pub struct OverrideSet {
    entries: HashMap<(String, String), Arc<dyn PropertyOverride>>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy-document properties of the well-known identity/access types
    pub fn with_policy_defaults() -> Self {
        let mut set = Self::new();
        for (owner, property) in POLICY_PROPERTIES {
            set.insert(*owner, *property, DomainTypeOverride::policy());
        }
        set
    }

    /// Register an override, replacing any existing one for the same pair
    pub fn insert(
        &mut self,
        owner: impl Into<String>,
        property: impl Into<String>,
        strategy: impl PropertyOverride + 'static,
    ) {
        self.entries
            .insert((owner.into(), property.into()), Arc::new(strategy));
    }

    pub fn get(&self, owner: &str, property: &str) -> Option<&dyn PropertyOverride> {
        self.entries
            .get(&(owner.to_string(), property.to_string()))
            .map(|o| o.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for OverrideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .map(|(owner, property)| format!("{}.{}", owner, property))
            .collect();
        keys.sort();
        f.debug_struct("OverrideSet").field("entries", &keys).finish()
    }
}
