//! EC2 operations trait for testing

use super::Ec2Client;
use super::types::{InstanceQuery, InstanceSummary, LaunchInstanceConfig};
use anyhow::Result;

/// Trait for EC2 operations that can be mocked in tests.
///
/// Command handlers depend on this trait rather than on [`Ec2Client`] so
/// the ownership gates can be unit tested without hitting real AWS.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Operations: Send + Sync {
    /// Describe instances matching the query (all pages)
    async fn describe_instances(&self, query: InstanceQuery) -> Result<Vec<InstanceSummary>>;

    /// Launch one instance and return its ID
    async fn launch_instance(&self, config: LaunchInstanceConfig) -> Result<String>;

    /// Stop an instance
    async fn stop_instance(&self, instance_id: &str) -> Result<()>;
}

impl Ec2Operations for Ec2Client {
    async fn describe_instances(&self, query: InstanceQuery) -> Result<Vec<InstanceSummary>> {
        Ec2Client::describe_instances(self, &query).await
    }

    async fn launch_instance(&self, config: LaunchInstanceConfig) -> Result<String> {
        Ec2Client::launch_instance(self, config).await
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<()> {
        Ec2Client::stop_instance(self, instance_id).await
    }
}
