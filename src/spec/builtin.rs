//! Embedded default catalogs
//!
//! A compact subset of the general resource specification plus the policy
//! document shapes. Larger catalogs are loaded from disk via the config file.

use super::registry::{SpecCatalog, SpecRegistry, GENERAL_DOMAIN, POLICY_DOMAIN};

/// General resource types
const GENERAL_SPECIFICATION: &str = r#"{
  "ResourceTypes": {
    "AWS::S3::Bucket": {
      "Attributes": {"Arn": {}, "DomainName": {}, "RegionalDomainName": {}, "WebsiteURL": {}},
      "Properties": {
        "AccessControl": {"PrimitiveType": "String"},
        "BucketName": {"PrimitiveType": "String"},
        "LifecycleConfiguration": {"Type": "LifecycleConfiguration"},
        "Tags": {"Type": "List", "ItemType": "Tag"},
        "VersioningConfiguration": {"Type": "VersioningConfiguration"}
      }
    },
    "AWS::S3::BucketPolicy": {
      "Properties": {
        "Bucket": {"PrimitiveType": "String", "Required": true},
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true}
      }
    },
    "AWS::IAM::Role": {
      "Attributes": {"Arn": {}, "RoleId": {}},
      "Properties": {
        "AssumeRolePolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "Description": {"PrimitiveType": "String"},
        "ManagedPolicyArns": {"Type": "List", "PrimitiveItemType": "String"},
        "MaxSessionDuration": {"PrimitiveType": "Integer"},
        "Path": {"PrimitiveType": "String"},
        "Policies": {"Type": "List", "ItemType": "Policy"},
        "RoleName": {"PrimitiveType": "String"},
        "Tags": {"Type": "List", "ItemType": "Tag"}
      }
    },
    "AWS::IAM::Policy": {
      "Properties": {
        "Groups": {"Type": "List", "PrimitiveItemType": "String"},
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "PolicyName": {"PrimitiveType": "String", "Required": true},
        "Roles": {"Type": "List", "PrimitiveItemType": "String"},
        "Users": {"Type": "List", "PrimitiveItemType": "String"}
      }
    },
    "AWS::IAM::ManagedPolicy": {
      "Properties": {
        "Description": {"PrimitiveType": "String"},
        "ManagedPolicyName": {"PrimitiveType": "String"},
        "Path": {"PrimitiveType": "String"},
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "Roles": {"Type": "List", "PrimitiveItemType": "String"}
      }
    },
    "AWS::IAM::User": {
      "Attributes": {"Arn": {}},
      "Properties": {
        "Groups": {"Type": "List", "PrimitiveItemType": "String"},
        "Path": {"PrimitiveType": "String"},
        "Policies": {"Type": "List", "ItemType": "Policy"},
        "UserName": {"PrimitiveType": "String"}
      }
    },
    "AWS::IAM::Group": {
      "Attributes": {"Arn": {}},
      "Properties": {
        "GroupName": {"PrimitiveType": "String"},
        "Path": {"PrimitiveType": "String"},
        "Policies": {"Type": "List", "ItemType": "Policy"}
      }
    },
    "AWS::SQS::Queue": {
      "Attributes": {"Arn": {}, "QueueName": {}, "QueueUrl": {}},
      "Properties": {
        "DelaySeconds": {"PrimitiveType": "Integer"},
        "FifoQueue": {"PrimitiveType": "Boolean"},
        "QueueName": {"PrimitiveType": "String"},
        "RedrivePolicy": {"PrimitiveType": "Json"},
        "Tags": {"Type": "List", "ItemType": "Tag"},
        "VisibilityTimeout": {"PrimitiveType": "Integer"}
      }
    },
    "AWS::SQS::QueuePolicy": {
      "Properties": {
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "Queues": {"Type": "List", "PrimitiveItemType": "String", "Required": true}
      }
    },
    "AWS::SNS::Topic": {
      "Attributes": {"TopicArn": {}, "TopicName": {}},
      "Properties": {
        "DisplayName": {"PrimitiveType": "String"},
        "Subscription": {"Type": "List", "ItemType": "Subscription"},
        "Tags": {"Type": "List", "ItemType": "Tag"},
        "TopicName": {"PrimitiveType": "String"}
      }
    },
    "AWS::SNS::TopicPolicy": {
      "Properties": {
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "Topics": {"Type": "List", "PrimitiveItemType": "String", "Required": true}
      }
    },
    "AWS::KMS::Key": {
      "Attributes": {"Arn": {}, "KeyId": {}},
      "Properties": {
        "Description": {"PrimitiveType": "String"},
        "EnableKeyRotation": {"PrimitiveType": "Boolean"},
        "Enabled": {"PrimitiveType": "Boolean"},
        "KeyPolicy": {"PrimitiveType": "Json", "Required": true},
        "KeyUsage": {"PrimitiveType": "String"},
        "PendingWindowInDays": {"PrimitiveType": "Integer"},
        "Tags": {"Type": "List", "ItemType": "Tag"}
      }
    }
  },
  "PropertyTypes": {
    "AWS::S3::Bucket.LifecycleConfiguration": {
      "Properties": {"Rules": {"Type": "List", "ItemType": "Rule", "Required": true}}
    },
    "AWS::S3::Bucket.Rule": {
      "Properties": {
        "ExpirationInDays": {"PrimitiveType": "Integer"},
        "Id": {"PrimitiveType": "String"},
        "Prefix": {"PrimitiveType": "String"},
        "Status": {"PrimitiveType": "String", "Required": true}
      }
    },
    "AWS::S3::Bucket.VersioningConfiguration": {
      "Properties": {"Status": {"PrimitiveType": "String", "Required": true}}
    },
    "AWS::IAM::Role.Policy": {
      "Properties": {
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "PolicyName": {"PrimitiveType": "String", "Required": true}
      }
    },
    "AWS::IAM::User.Policy": {
      "Properties": {
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "PolicyName": {"PrimitiveType": "String", "Required": true}
      }
    },
    "AWS::IAM::Group.Policy": {
      "Properties": {
        "PolicyDocument": {"PrimitiveType": "Json", "Required": true},
        "PolicyName": {"PrimitiveType": "String", "Required": true}
      }
    },
    "AWS::SNS::Topic.Subscription": {
      "Properties": {
        "Endpoint": {"PrimitiveType": "String", "Required": true},
        "Protocol": {"PrimitiveType": "String", "Required": true}
      }
    },
    "Tag": {
      "Properties": {
        "Key": {"PrimitiveType": "String", "Required": true},
        "Value": {"PrimitiveType": "String", "Required": true}
      }
    }
  }
}"#;

/// Policy document shapes
const POLICY_SPECIFICATION: &str = r#"{
  "PropertyTypes": {
    "Policy": {
      "Properties": {
        "Id": {"PrimitiveType": "String"},
        "Statement": {"Type": "List", "ItemType": "Statement", "Required": true},
        "Version": {"PrimitiveType": "String", "Required": true}
      }
    },
    "Statement": {
      "Properties": {
        "Action": {"Type": "List", "PrimitiveItemType": "String"},
        "Condition": {"Type": "Map", "PrimitiveItemType": "Json"},
        "Effect": {"PrimitiveType": "String", "Required": true},
        "NotAction": {"Type": "List", "PrimitiveItemType": "String"},
        "NotPrincipal": {"Type": "Principal"},
        "NotResource": {"Type": "List", "PrimitiveItemType": "String"},
        "Principal": {"Type": "Principal"},
        "Resource": {"Type": "List", "PrimitiveItemType": "String"},
        "Sid": {"PrimitiveType": "String"}
      }
    },
    "Principal": {
      "Properties": {
        "AWS": {"Type": "List", "PrimitiveItemType": "String"},
        "CanonicalUser": {"Type": "List", "PrimitiveItemType": "String"},
        "Federated": {"Type": "List", "PrimitiveItemType": "String"},
        "Service": {"Type": "List", "PrimitiveItemType": "String"}
      }
    }
  }
}"#;

/// The general registry shipped with the crate
pub fn general_registry() -> SpecRegistry {
    SpecRegistry::from_json_str(GENERAL_DOMAIN, GENERAL_SPECIFICATION)
        .expect("Embedded general specification should be valid JSON")
}

/// The policy registry shipped with the crate
pub fn policy_registry() -> SpecRegistry {
    SpecRegistry::from_json_str(POLICY_DOMAIN, POLICY_SPECIFICATION)
        .expect("Embedded policy specification should be valid JSON")
}

impl SpecCatalog {
    /// Catalog made of the embedded general and policy registries
    pub fn builtin() -> Self {
        SpecCatalog::new()
            .with_registry(general_registry())
            .with_registry(policy_registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::types::{PrimitiveType, PropertyKind};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = SpecCatalog::builtin();
        let names = catalog.list_resource_type_names(GENERAL_DOMAIN);
        assert!(names.contains(&"AWS::S3::Bucket".to_string()));
        assert!(names.contains(&"AWS::IAM::Role".to_string()));
        assert!(catalog.resolve_property_type(POLICY_DOMAIN, "Policy").is_ok());
    }

    #[test]
    fn test_policy_statement_references_resolve() {
        let catalog = SpecCatalog::builtin();
        let statement = catalog
            .resolve_property_type(POLICY_DOMAIN, "Statement")
            .expect("Should resolve");
        let principal = statement
            .properties
            .iter()
            .find(|p| p.name == "Principal")
            .unwrap();
        assert_eq!(principal.kind, PropertyKind::nested("Principal"));
    }

    #[test]
    fn test_statement_condition_is_free_form() {
        let registry = policy_registry();
        assert_eq!(registry.property_type_count(), 3);
        let statement = registry.property_type("Statement").expect("Statement");
        let condition = statement
            .properties
            .iter()
            .find(|p| p.name == "Condition")
            .unwrap();
        assert_eq!(
            condition.kind,
            PropertyKind::map_of(PropertyKind::Scalar(PrimitiveType::Json))
        );
        assert!(registry.property_type("Condition").is_none());
    }

    #[test]
    fn test_role_policies_use_scoped_type() {
        let catalog = SpecCatalog::builtin();
        let role = catalog
            .resolve_resource_type(GENERAL_DOMAIN, "AWS::IAM::Role")
            .unwrap();
        assert_eq!(
            role.property("Policies").unwrap().kind,
            PropertyKind::list_of(PropertyKind::nested("AWS::IAM::Role.Policy"))
        );
        assert!(catalog
            .resolve_property_type(GENERAL_DOMAIN, "AWS::IAM::Role.Policy")
            .is_ok());
    }
}
