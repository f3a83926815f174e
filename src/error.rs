//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::spec::{CatalogError, SpecError};

/// Errors that can occur anywhere between loading inputs and rendering output
#[derive(Debug, Error)]
pub enum Error {
    /// A requested or referenced type is missing from its domain
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A specification catalog file could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The configuration file could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A template document is not valid JSON
    #[error("invalid template: {0}")]
    Template(#[from] serde_json::Error),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::TypeCategory;

    #[test]
    fn test_spec_error_message_passes_through() {
        let err: Error = SpecError::unknown(TypeCategory::Resource, "cfn", "AWS::Nope").into();
        assert_eq!(
            err.to_string(),
            "unknown resource type 'AWS::Nope' in domain 'cfn'"
        );
    }
}
