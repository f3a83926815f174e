//! Domain registries and the catalog that groups them

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::types::{PropertyTypeDef, ResourceTypeDef};

/// Domain tag of the general resource catalog
pub const GENERAL_DOMAIN: &str = "cfn";

/// Domain tag of the identity/access policy catalog
pub const POLICY_DOMAIN: &str = "iam";

/// Which table of a registry a lookup targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Resource,
    Property,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Resource => write!(f, "resource"),
            TypeCategory::Property => write!(f, "property"),
        }
    }
}

/// Errors from type lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Type name absent from the named domain (or the domain is not loaded)
    #[error("unknown {category} type '{name}' in domain '{domain}'")]
    UnknownType {
        category: TypeCategory,
        domain: String,
        name: String,
    },
}

impl SpecError {
    pub fn unknown(category: TypeCategory, domain: &str, name: &str) -> Self {
        Self::UnknownType {
            category,
            domain: domain.to_string(),
            name: name.to_string(),
        }
    }
}

/// Type definitions belonging to one domain.
///
/// Registries are assembled up front and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    domain: String,
    resource_types: HashMap<String, ResourceTypeDef>,
    property_types: HashMap<String, PropertyTypeDef>,
}

impl SpecRegistry {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            resource_types: HashMap::new(),
            property_types: HashMap::new(),
        }
    }

    /// Add a resource type, replacing any previous definition of that name
    pub fn with_resource_type(mut self, def: ResourceTypeDef) -> Self {
        self.resource_types.insert(def.name.clone(), def);
        self
    }

    /// Add a property type, replacing any previous definition of that name
    pub fn with_property_type(mut self, def: PropertyTypeDef) -> Self {
        self.property_types.insert(def.name.clone(), def);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeDef> {
        self.resource_types.get(name)
    }

    pub fn property_type(&self, name: &str) -> Option<&PropertyTypeDef> {
        self.property_types.get(name)
    }

    /// Resource type names in ascending lexicographic order
    pub fn resource_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resource_types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn resource_type_count(&self) -> usize {
        self.resource_types.len()
    }

    pub fn property_type_count(&self) -> usize {
        self.property_types.len()
    }
}

/// All loaded registries, keyed by domain
#[derive(Debug, Clone, Default)]
pub struct SpecCatalog {
    registries: HashMap<String, SpecRegistry>,
}

impl SpecCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registry under its own domain tag, replacing an earlier one
    pub fn with_registry(mut self, registry: SpecRegistry) -> Self {
        self.registries
            .insert(registry.domain().to_string(), registry);
        self
    }

    pub fn registry(&self, domain: &str) -> Option<&SpecRegistry> {
        self.registries.get(domain)
    }

    pub fn resolve_resource_type(
        &self,
        domain: &str,
        name: &str,
    ) -> Result<&ResourceTypeDef, SpecError> {
        self.registry(domain)
            .and_then(|r| r.resource_type(name))
            .ok_or_else(|| SpecError::unknown(TypeCategory::Resource, domain, name))
    }

    pub fn resolve_property_type(
        &self,
        domain: &str,
        name: &str,
    ) -> Result<&PropertyTypeDef, SpecError> {
        self.registry(domain)
            .and_then(|r| r.property_type(name))
            .ok_or_else(|| SpecError::unknown(TypeCategory::Property, domain, name))
    }

    /// Sorted resource type names of a domain; empty for an unloaded domain
    pub fn list_resource_type_names(&self, domain: &str) -> Vec<String> {
        self.registry(domain)
            .map(|r| {
                r.resource_type_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
