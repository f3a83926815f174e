//! Catalog-driven template expansion

use tracing::{debug, trace};

use crate::document::{Document, Mapping, Node};
use crate::spec::{
    PrimitiveType, PropertyDef, PropertyKind, SpecCatalog, SpecError, TypeRef, GENERAL_DOMAIN,
};

use super::context::ExpansionContext;
use super::overrides::{OverrideSet, PropertyOverride};
use super::{BuildMode, Template};

/// Template format version written into every skeleton
pub const FORMAT_VERSION: &str = "2010-09-09";

/// Comment on the placeholder left where a type re-enters itself
pub const RECURSIVE_MARKER: &str = "recursive type, expand manually";

/// Key used for the single example entry of a map-typed property
pub const MAP_PLACEHOLDER_KEY: &str = "Key";

/// Builds template skeletons from a specification catalog
#[derive(Debug, Clone)]
pub struct TemplateBuilder<'a> {
    catalog: &'a SpecCatalog,
    primary_domain: String,
    overrides: OverrideSet,
    description: Option<String>,
}

impl<'a> TemplateBuilder<'a> {
    /// Builder over the general domain with the default policy overrides
    pub fn new(catalog: &'a SpecCatalog) -> Self {
        Self {
            catalog,
            primary_domain: GENERAL_DOMAIN.to_string(),
            overrides: OverrideSet::with_policy_defaults(),
            description: None,
        }
    }

    /// Resolve requested resource types in another domain
    pub fn with_primary_domain(mut self, domain: impl Into<String>) -> Self {
        self.primary_domain = domain.into();
        self
    }

    /// Replace the whole override set
    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = overrides;
        self
    }

    /// Add one override on top of the current set
    pub fn with_override(
        mut self,
        owner: impl Into<String>,
        property: impl Into<String>,
        strategy: impl PropertyOverride + 'static,
    ) -> Self {
        self.overrides.insert(owner, property, strategy);
        self
    }

    /// Set the template `Description`
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn catalog(&self) -> &SpecCatalog {
        self.catalog
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Build a template holding one resource per requested type name.
    ///
    /// Fails on the first type name (requested or referenced) that is absent
    /// from its domain; no partial document is returned.
    pub fn build<S: AsRef<str>>(
        &self,
        requested: &[S],
        mode: BuildMode,
    ) -> Result<Template, SpecError> {
        debug!(count = requested.len(), ?mode, "building template");

        let mut resources = Mapping::new();
        for type_name in requested {
            let type_name = type_name.as_ref();
            let def = self
                .catalog
                .resolve_resource_type(&self.primary_domain, type_name)?;

            let mut ctx = ExpansionContext::new(mode);
            let properties = self.expand_fields(
                &def.name,
                &def.properties,
                &self.primary_domain,
                &mut ctx,
            )?;
            if ctx.truncated() > 0 {
                debug!(type_name, truncated = ctx.truncated(), "recursive types left unexpanded");
            }

            let logical_name = unique_logical_name(type_name, &resources);
            resources.insert(
                logical_name,
                Node::from_pairs([
                    ("Type", Node::string(type_name)),
                    ("Properties", properties),
                ]),
            );
        }

        let mut root = Mapping::new();
        root.insert(
            "AWSTemplateFormatVersion".to_string(),
            Node::string(FORMAT_VERSION),
        );
        if let Some(description) = &self.description {
            root.insert("Description".to_string(), Node::string(description.clone()));
        }
        root.insert("Resources".to_string(), Node::mapping(resources));

        let document = Document::new(Node::mapping(root));
        let comments = document.comments();
        Ok(Template { document, comments })
    }

    /// Expand a named property type, or leave a placeholder if it is already
    /// being expanded on the current path
    pub fn expand_type(
        &self,
        type_ref: &TypeRef,
        domain: &str,
        ctx: &mut ExpansionContext,
    ) -> Result<Node, SpecError> {
        let domain = type_ref.domain.as_deref().unwrap_or(domain);
        let name = type_ref.name.as_str();

        if ctx.is_expanding(domain, name) {
            trace!(domain, name, "recursive type");
            ctx.record_truncation();
            return Ok(Node::empty_mapping().with_comment(RECURSIVE_MARKER));
        }

        let def = self.catalog.resolve_property_type(domain, name)?;
        ctx.start_expanding(domain, name);
        let result = self.expand_fields(&def.name, &def.properties, domain, ctx);
        ctx.done_expanding(domain, name);
        result
    }

    fn expand_fields(
        &self,
        owner: &str,
        fields: &[PropertyDef],
        domain: &str,
        ctx: &mut ExpansionContext,
    ) -> Result<Node, SpecError> {
        let mode = ctx.mode;
        let mut entries = Mapping::new();
        for field in fields.iter().filter(|f| mode.includes(f)) {
            let node = self.expand_property(owner, field, domain, ctx)?;
            entries.insert(field.name.clone(), node);
        }
        Ok(Node::mapping(entries))
    }

    fn expand_property(
        &self,
        owner: &str,
        field: &PropertyDef,
        domain: &str,
        ctx: &mut ExpansionContext,
    ) -> Result<Node, SpecError> {
        let (mut node, description) = match self.overrides.get(owner, &field.name) {
            Some(strategy) => {
                trace!(owner, property = field.name.as_str(), "using override");
                (strategy.expand(self, ctx)?, strategy.describe())
            }
            None => (
                self.expand_kind(&field.kind, domain, ctx)?,
                describe_kind(&field.kind),
            ),
        };

        if node.comment.is_none() {
            let requiredness = if field.required { "required" } else { "optional" };
            node.comment = Some(format!("{}, {}", description, requiredness));
        }
        Ok(node)
    }

    fn expand_kind(
        &self,
        kind: &PropertyKind,
        domain: &str,
        ctx: &mut ExpansionContext,
    ) -> Result<Node, SpecError> {
        match kind {
            PropertyKind::Scalar(primitive) => Ok(placeholder(*primitive)),
            PropertyKind::List(item) => {
                Ok(Node::sequence(vec![self.expand_kind(item, domain, ctx)?]))
            }
            PropertyKind::Map(value) => Ok(Node::from_pairs([(
                MAP_PLACEHOLDER_KEY,
                self.expand_kind(value, domain, ctx)?,
            )])),
            PropertyKind::Nested(type_ref) => self.expand_type(type_ref, domain, ctx),
        }
    }
}

/// Placeholder value typed to match a primitive
pub fn placeholder(primitive: PrimitiveType) -> Node {
    match primitive {
        PrimitiveType::String | PrimitiveType::Timestamp => Node::string(""),
        PrimitiveType::Integer | PrimitiveType::Long => Node::integer(0),
        PrimitiveType::Double => Node::float(0.0),
        PrimitiveType::Boolean => Node::bool(false),
        PrimitiveType::Json => Node::empty_mapping(),
    }
}

fn describe_kind(kind: &PropertyKind) -> String {
    match kind {
        PropertyKind::List(_) | PropertyKind::Map(_) => format!("{} (repeatable)", kind),
        _ => kind.to_string(),
    }
}

/// Logical name for a resource type: its alphanumeric characters, numbered
/// from 2 when already taken
pub fn unique_logical_name(type_name: &str, taken: &Mapping) -> String {
    let mut base: String = type_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if base.is_empty() {
        base = "Resource".to_string();
    }

    if !taken.contains_key(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or(base)
}
