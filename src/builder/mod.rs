//! Template skeleton builder
//!
//! Expands requested resource types into a document whose properties carry
//! typed placeholder values and comments describing each property. Nested
//! property types are expanded recursively; a type met again on its own
//! expansion path becomes an empty placeholder instead.
//!
//! # Example
//!
//! ```rust
//! use cfn_scaffold::builder::{BuildMode, TemplateBuilder};
//! use cfn_scaffold::spec::SpecCatalog;
//!
//! let catalog = SpecCatalog::builtin();
//! let template = TemplateBuilder::new(&catalog)
//!     .build(&["AWS::S3::Bucket"], BuildMode::Bare)
//!     .unwrap();
//! assert!(template.document.section("Resources").unwrap().contains_key("AWSS3Bucket"));
//! ```

mod context;
mod overrides;
mod template;

use serde::Deserialize;

use crate::document::{Comment, Document};
use crate::spec::PropertyDef;

pub use context::ExpansionContext;
pub use overrides::{DomainTypeOverride, OverrideSet, PropertyOverride, POLICY_TYPE};
pub use template::{
    placeholder, unique_logical_name, TemplateBuilder, FORMAT_VERSION, MAP_PLACEHOLDER_KEY,
    RECURSIVE_MARKER,
};

/// How complete a generated template is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Required properties only
    Bare,
    /// Every property
    #[default]
    Full,
}

impl BuildMode {
    /// Whether a property is emitted in this mode
    pub fn includes(&self, property: &PropertyDef) -> bool {
        match self {
            BuildMode::Bare => property.required,
            BuildMode::Full => true,
        }
    }
}

/// A built template and its comments in traversal order
#[derive(Debug, Clone)]
pub struct Template {
    pub document: Document,
    pub comments: Vec<Comment>,
}
