//! EC2 types and configuration

use platform_cli_common::{OwnershipFilter, TagSet};
use serde::Serialize;

/// Instance info as reported by `DescribeInstances`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceSummary {
    pub instance_id: String,
    /// Lifecycle state name (e.g., "running", "stopped")
    pub state: String,
    /// Value of the `Name` tag, if any
    pub name: Option<String>,
    pub tags: TagSet,
}

impl InstanceSummary {
    /// Whether the instance still counts toward the managed-instance quota
    pub fn is_live(&self) -> bool {
        !matches!(self.state.as_str(), "terminated" | "shutting-down")
    }
}

/// Parameters for a `DescribeInstances` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceQuery {
    /// Restrict to a single instance ID
    pub instance_id: Option<String>,
    /// Server-side ownership filter
    pub owner: OwnershipFilter,
}

impl InstanceQuery {
    /// All instances carrying the identity marker
    pub fn owned(owner: OwnershipFilter) -> Self {
        Self {
            instance_id: None,
            owner,
        }
    }

    /// One specific instance, returned only if it carries the identity marker
    pub fn owned_by_id(owner: OwnershipFilter, instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: Some(instance_id.into()),
            owner,
        }
    }
}

/// Configuration for launching an EC2 instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchInstanceConfig {
    /// AMI to boot
    pub image_id: String,
    /// EC2 instance type (e.g., "t3.micro")
    pub instance_type: String,
    /// Tags applied atomically at launch
    pub tags: TagSet,
}

impl LaunchInstanceConfig {
    pub fn new(image_id: impl Into<String>, instance_type: impl Into<String>, tags: TagSet) -> Self {
        Self {
            image_id: image_id.into(),
            instance_type: instance_type.into(),
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(state: &str) -> InstanceSummary {
        InstanceSummary {
            instance_id: "i-0abc".to_string(),
            state: state.to_string(),
            name: None,
            tags: TagSet::new(),
        }
    }

    #[test]
    fn terminated_instances_are_not_live() {
        assert!(summary("running").is_live());
        assert!(summary("stopped").is_live());
        assert!(summary("pending").is_live());
        assert!(!summary("terminated").is_live());
        assert!(!summary("shutting-down").is_live());
    }
}
