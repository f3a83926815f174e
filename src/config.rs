//! Configuration file support
//!
//! A TOML file selects the specification catalogs, the build mode, rendering
//! options and any additional property overrides. Every section is optional
//! and falls back to the embedded defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::builder::{BuildMode, DomainTypeOverride, OverrideSet};
use crate::graph::EdgeTag;
use crate::render::RenderConfig;
use crate::spec::{
    general_registry, policy_registry, CatalogError, SpecCatalog, SpecRegistry, GENERAL_DOMAIN,
    POLICY_DOMAIN,
};

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Edge label for '{0}' must not be empty")]
    InvalidLabel(EdgeTag),
}

const DEFAULT_CONFIG: &str = r#"
[build]
mode = "full"
description = "Template generated by cfn-scaffold"

[render]
order = "source"
indent = 2
show_comments = true
cycle_marker = " (*)"

[render.labels]
explicit = "DependsOn"
reference = "DependsOn"
attribute = "DependsOn"
condition = "DependsOn"
"#;

/// Specification catalog files; unset domains use the embedded catalogs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub general: Option<PathBuf>,
    pub policy: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub mode: BuildMode,
    pub description: Option<String>,
}

/// One `[[overrides]]` entry: source `owner.property` from `domain`'s `type`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverrideEntry {
    pub owner: String,
    pub property: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub build: BuildConfig,
    pub render: RenderConfig,
    pub overrides: Vec<OverrideEntry>,

    /// Directory relative catalog paths are resolved against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    /// The configuration used when no file is given
    pub fn builtin() -> Self {
        Self::from_str(DEFAULT_CONFIG).expect("Default config should be valid TOML")
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for tag in EdgeTag::ALL {
            if self.render.labels.get(tag).trim().is_empty() {
                return Err(ConfigError::InvalidLabel(tag));
            }
        }
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        self.render.clone()
    }

    /// Default policy overrides plus the configured entries
    pub fn override_set(&self) -> OverrideSet {
        let mut set = OverrideSet::with_policy_defaults();
        for entry in &self.overrides {
            set.insert(
                entry.owner.clone(),
                entry.property.clone(),
                DomainTypeOverride::new(entry.domain.clone(), entry.type_name.clone()),
            );
        }
        set
    }

    /// Catalog with configured files replacing the embedded registries
    pub fn load_catalog(&self) -> Result<SpecCatalog, CatalogError> {
        let general = match &self.catalog.general {
            Some(path) => self.load_registry(GENERAL_DOMAIN, path)?,
            None => general_registry(),
        };
        let policy = match &self.catalog.policy {
            Some(path) => self.load_registry(POLICY_DOMAIN, path)?,
            None => policy_registry(),
        };
        Ok(SpecCatalog::new().with_registry(general).with_registry(policy))
    }

    fn load_registry(&self, domain: &str, path: &Path) -> Result<SpecRegistry, CatalogError> {
        let path = match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        };
        debug!(domain, path = %path.display(), "loading specification");
        SpecRegistry::from_file(domain, &path)
    }
}
