//! EC2 instance management

mod instance;
mod operations;
mod types;

pub use operations::Ec2Operations;
pub use types::{InstanceQuery, InstanceSummary, LaunchInstanceConfig};

#[cfg(test)]
pub use operations::MockEc2Operations;

use crate::aws::context::{AwsContext, FromAwsContext};
use aws_sdk_ec2::Client;

/// EC2 client for managing tagged instances
pub struct Ec2Client {
    pub(crate) client: Client,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}
