//! Loader for resource specification documents in the CloudFormation JSON shape

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::IgnoredAny;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::registry::SpecRegistry;
use super::types::{PrimitiveType, PropertyDef, PropertyKind, PropertyTypeDef, ResourceTypeDef};

/// Errors that can occur when loading a specification document
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read specification file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse specification JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// Maps are ordered so properties land in lexicographic order

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSpecification {
    #[serde(default)]
    resource_types: BTreeMap<String, RawResourceType>,
    #[serde(default)]
    property_types: BTreeMap<String, RawPropertyType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawResourceType {
    #[serde(default)]
    properties: BTreeMap<String, RawProperty>,
    #[serde(default)]
    attributes: BTreeMap<String, IgnoredAny>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPropertyType {
    #[serde(default)]
    properties: BTreeMap<String, RawProperty>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawProperty {
    primitive_type: Option<String>,
    #[serde(rename = "Type")]
    type_name: Option<String>,
    item_type: Option<String>,
    primitive_item_type: Option<String>,
    #[serde(default)]
    required: bool,
}

impl SpecRegistry {
    /// Load a registry for `domain` from a specification JSON file
    pub fn from_file(domain: &str, path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(domain, &content)
    }

    /// Load a registry for `domain` from specification JSON text
    pub fn from_json_str(domain: &str, content: &str) -> Result<Self, CatalogError> {
        let raw: RawSpecification = serde_json::from_str(content)?;
        let known = |name: &str| raw.property_types.contains_key(name);

        let mut registry = SpecRegistry::new(domain);
        for (name, property_type) in &raw.property_types {
            let properties = convert_properties(name, &property_type.properties, &known);
            registry = registry.with_property_type(PropertyTypeDef::new(name.clone(), properties));
        }
        for (name, resource_type) in &raw.resource_types {
            let properties = convert_properties(name, &resource_type.properties, &known);
            registry = registry.with_resource_type(
                ResourceTypeDef::new(name.clone(), properties)
                    .with_attributes(resource_type.attributes.keys().cloned()),
            );
        }

        debug!(
            domain,
            resource_types = registry.resource_type_count(),
            property_types = registry.property_type_count(),
            "loaded specification"
        );
        Ok(registry)
    }
}

fn convert_properties(
    owner: &str,
    raw: &BTreeMap<String, RawProperty>,
    known: &dyn Fn(&str) -> bool,
) -> Vec<PropertyDef> {
    raw.iter()
        .map(|(name, property)| PropertyDef {
            name: name.clone(),
            kind: convert_kind(owner, property, known),
            required: property.required,
        })
        .collect()
}

fn convert_kind(owner: &str, property: &RawProperty, known: &dyn Fn(&str) -> bool) -> PropertyKind {
    if let Some(primitive) = &property.primitive_type {
        return match PrimitiveType::parse(primitive) {
            Some(p) => PropertyKind::Scalar(p),
            // Some published specs mark maps as a primitive
            None if primitive == "Map" => PropertyKind::map_of(PropertyKind::Scalar(PrimitiveType::Json)),
            None => {
                debug!(owner, primitive = primitive.as_str(), "unrecognised primitive, using Json");
                PropertyKind::Scalar(PrimitiveType::Json)
            }
        };
    }

    match property.type_name.as_deref() {
        Some("List") => PropertyKind::list_of(item_kind(owner, property, known)),
        Some("Map") => PropertyKind::map_of(item_kind(owner, property, known)),
        Some(name) => PropertyKind::nested(qualify(owner, name, known)),
        None => PropertyKind::Scalar(PrimitiveType::Json),
    }
}

fn item_kind(owner: &str, property: &RawProperty, known: &dyn Fn(&str) -> bool) -> PropertyKind {
    if let Some(primitive) = &property.primitive_item_type {
        PropertyKind::Scalar(PrimitiveType::parse(primitive).unwrap_or(PrimitiveType::Json))
    } else if let Some(item) = &property.item_type {
        PropertyKind::nested(qualify(owner, item, known))
    } else {
        PropertyKind::Scalar(PrimitiveType::Json)
    }
}

/// Resolve a nested type name relative to the resource that owns it.
///
/// `AWS::S3::Bucket` or `AWS::S3::Bucket.Rule` referring to `Tag` yields
/// `AWS::S3::Bucket.Tag` when that exists, else the global `Tag`. Names that
/// exist in neither form keep the scoped spelling and fail at build time.
fn qualify(owner: &str, name: &str, known: &dyn Fn(&str) -> bool) -> String {
    let prefix = owner.split('.').next().unwrap_or(owner);
    let scoped = format!("{}.{}", prefix, name);
    if known(&scoped) {
        scoped
    } else if known(name) {
        name.to_string()
    } else {
        scoped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::registry::GENERAL_DOMAIN;

    const SAMPLE: &str = r#"{
        "ResourceTypes": {
            "AWS::S3::Bucket": {
                "Attributes": {"Arn": {"PrimitiveType": "String"}, "DomainName": {}},
                "Properties": {
                    "Tags": {"Type": "List", "ItemType": "Tag", "Required": false},
                    "BucketName": {"PrimitiveType": "String", "Required": false},
                    "LifecycleConfiguration": {"Type": "LifecycleConfiguration"},
                    "Metadata": {"PrimitiveType": "Map"},
                    "Names": {"Type": "Map", "PrimitiveItemType": "String", "Required": true}
                }
            }
        },
        "PropertyTypes": {
            "AWS::S3::Bucket.LifecycleConfiguration": {
                "Properties": {"Rules": {"Type": "List", "ItemType": "Rule", "Required": true}}
            },
            "AWS::S3::Bucket.Rule": {
                "Properties": {"Status": {"PrimitiveType": "String", "Required": true}}
            },
            "Tag": {
                "Properties": {
                    "Key": {"PrimitiveType": "String", "Required": true},
                    "Value": {"PrimitiveType": "String", "Required": true}
                }
            }
        }
    }"#;

    #[test]
    fn test_load_resource_type() {
        let registry = SpecRegistry::from_json_str(GENERAL_DOMAIN, SAMPLE).expect("Should load");
        let bucket = registry.resource_type("AWS::S3::Bucket").expect("Should exist");

        let names: Vec<&str> = bucket.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["BucketName", "LifecycleConfiguration", "Metadata", "Names", "Tags"]
        );
        assert_eq!(
            bucket.attributes.iter().cloned().collect::<Vec<_>>(),
            vec!["Arn", "DomainName"]
        );
        assert!(bucket.property("Names").unwrap().required);
    }

    #[test]
    fn test_nested_names_are_qualified() {
        let registry = SpecRegistry::from_json_str(GENERAL_DOMAIN, SAMPLE).expect("Should load");
        let bucket = registry.resource_type("AWS::S3::Bucket").unwrap();

        assert_eq!(
            bucket.property("Tags").unwrap().kind,
            PropertyKind::list_of(PropertyKind::nested("Tag"))
        );
        assert_eq!(
            bucket.property("LifecycleConfiguration").unwrap().kind,
            PropertyKind::nested("AWS::S3::Bucket.LifecycleConfiguration")
        );

        let lifecycle = registry
            .property_type("AWS::S3::Bucket.LifecycleConfiguration")
            .unwrap();
        assert_eq!(
            lifecycle.properties[0].kind,
            PropertyKind::list_of(PropertyKind::nested("AWS::S3::Bucket.Rule"))
        );
    }

    #[test]
    fn test_map_primitive_is_corrected() {
        let registry = SpecRegistry::from_json_str(GENERAL_DOMAIN, SAMPLE).expect("Should load");
        let bucket = registry.resource_type("AWS::S3::Bucket").unwrap();
        assert_eq!(
            bucket.property("Metadata").unwrap().kind,
            PropertyKind::map_of(PropertyKind::Scalar(PrimitiveType::Json))
        );
    }

    #[test]
    fn test_invalid_json_error() {
        let result = SpecRegistry::from_json_str(GENERAL_DOMAIN, "{ not json");
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }
}
