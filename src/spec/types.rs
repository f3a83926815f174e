//! Resource and property type definitions

use std::collections::BTreeSet;
use std::fmt;

/// Primitive value types a scalar property may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    Timestamp,
    /// Free-form JSON object
    Json,
}

impl PrimitiveType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "String" => Some(Self::String),
            "Integer" => Some(Self::Integer),
            "Long" => Some(Self::Long),
            "Double" => Some(Self::Double),
            "Boolean" => Some(Self::Boolean),
            "Timestamp" => Some(Self::Timestamp),
            "Json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Timestamp => "Timestamp",
            Self::Json => "Json",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a named property type.
///
/// `domain: None` means the domain of the definition holding the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub domain: Option<String>,
    pub name: String,
}

impl TypeRef {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            domain: None,
            name: name.into(),
        }
    }

    pub fn in_domain(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            name: name.into(),
        }
    }
}

/// The shape of a property's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Scalar(PrimitiveType),
    List(Box<PropertyKind>),
    Map(Box<PropertyKind>),
    Nested(TypeRef),
}

impl PropertyKind {
    pub fn list_of(item: PropertyKind) -> Self {
        Self::List(Box::new(item))
    }

    pub fn map_of(value: PropertyKind) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn nested(name: impl Into<String>) -> Self {
        Self::Nested(TypeRef::local(name))
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Scalar(p) => write!(f, "{}", p),
            PropertyKind::List(item) => write!(f, "List of {}", item),
            PropertyKind::Map(value) => write!(f, "Map of {}", value),
            PropertyKind::Nested(r) => write!(f, "{}", r.name),
        }
    }
}

/// A single named property within a resource or property type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub required: bool,
}

impl PropertyDef {
    pub fn required(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// A reusable structural shape for property values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTypeDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
}

impl PropertyTypeDef {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// A provisionable resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTypeDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
    /// Attribute names readable through `Fn::GetAtt`
    pub attributes: BTreeSet<String>,
}

impl ResourceTypeDef {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: name.into(),
            properties,
            attributes: BTreeSet::new(),
        }
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        for p in [
            PrimitiveType::String,
            PrimitiveType::Integer,
            PrimitiveType::Long,
            PrimitiveType::Double,
            PrimitiveType::Boolean,
            PrimitiveType::Timestamp,
            PrimitiveType::Json,
        ] {
            assert_eq!(PrimitiveType::parse(p.as_str()), Some(p));
        }
        assert_eq!(PrimitiveType::parse("Map"), None);
    }

    #[test]
    fn test_kind_display() {
        let kind = PropertyKind::list_of(PropertyKind::map_of(PropertyKind::nested("Tag")));
        assert_eq!(kind.to_string(), "List of Map of Tag");
    }
}
