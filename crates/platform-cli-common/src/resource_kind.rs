//! AWS resource families managed by platform-cli

use std::fmt;

/// Types of AWS resources managed by platform-cli
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// EC2 instance
    Ec2Instance,
    /// S3 bucket
    S3Bucket,
    /// S3 object inside a bucket
    S3Object,
    /// Route53 hosted zone
    HostedZone,
}

impl ResourceKind {
    /// Human-readable name used in command output
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Ec2Instance => "instance",
            ResourceKind::S3Bucket => "bucket",
            ResourceKind::S3Object => "object",
            ResourceKind::HostedZone => "zone",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
