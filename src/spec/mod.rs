//! Resource specification catalogs
//!
//! Type definitions are grouped into domains. The general domain describes
//! provisionable resources; the policy domain describes the structure of
//! identity/access policy documents, which the general catalog only types as
//! free-form JSON.

mod builtin;
mod catalog;
mod registry;
mod types;

pub use builtin::{general_registry, policy_registry};
pub use catalog::CatalogError;
pub use registry::{
    SpecCatalog, SpecError, SpecRegistry, TypeCategory, GENERAL_DOMAIN, POLICY_DOMAIN,
};
pub use types::{PrimitiveType, PropertyDef, PropertyKind, PropertyTypeDef, ResourceTypeDef, TypeRef};
