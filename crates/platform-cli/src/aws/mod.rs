//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: Instance listing, launch and stop
//! - S3: Bucket creation, encryption, tagging and object transfer
//! - Route53: Hosted zones, zone tags and record changes
//!
//! Each wrapper exposes an `*Operations` trait so command handlers can be
//! tested against mocks.

pub mod context;
pub mod ec2;
pub mod error;
pub mod route53;
pub mod s3;
pub mod tags;

pub use context::{AwsContext, FromAwsContext};

// Core clients
pub use ec2::{Ec2Client, Ec2Operations, InstanceQuery, InstanceSummary, LaunchInstanceConfig};
pub use route53::{
    HostedZoneSummary, RecordAction, RecordChange, Route53Client, Route53Operations, ZoneId,
};
pub use s3::{S3Client, S3Operations};

// Error handling
pub use error::{AwsError, classify_aws_error, classify_sdk_error, find_aws_error, is_not_found};

#[cfg(test)]
pub use ec2::MockEc2Operations;
#[cfg(test)]
pub use route53::MockRoute53Operations;
#[cfg(test)]
pub use s3::MockS3Operations;
