//! EC2 instance lifecycle operations

use super::Ec2Client;
use super::types::{InstanceQuery, InstanceSummary, LaunchInstanceConfig};
use crate::aws::error::classify_sdk_error;
use crate::aws::tags::{ec2_ownership_filter, ec2_tag_spec, tag_set_from_ec2};
use anyhow::{Context, Result};
use aws_sdk_ec2::types::{Instance, InstanceType, ResourceType};
use platform_cli_common::tags::TAG_NAME;
use tracing::{debug, info};

impl Ec2Client {
    /// Describe instances matching the query, following pagination.
    ///
    /// The ownership filter is applied server-side, so instances without the
    /// identity marker are never returned. Querying an ID that does not
    /// exist fails with a "not found" [`AwsError`](crate::aws::AwsError).
    pub async fn describe_instances(&self, query: &InstanceQuery) -> Result<Vec<InstanceSummary>> {
        let mut instances = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .describe_instances()
                .filters(ec2_ownership_filter(&query.owner))
                .set_next_token(next_token.take());

            if let Some(id) = &query.instance_id {
                request = request.instance_ids(id);
            }

            let response = request
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e))
                .context("Failed to describe instances")?;

            for reservation in response.reservations() {
                instances.extend(reservation.instances().iter().filter_map(summarize));
            }

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(
            count = instances.len(),
            instance_id = ?query.instance_id,
            "Described owned instances"
        );
        Ok(instances)
    }

    /// Launch a single instance with its tags attached at creation time.
    pub async fn launch_instance(&self, config: LaunchInstanceConfig) -> Result<String> {
        info!(
            instance_type = %config.instance_type,
            ami = %config.image_id,
            "Launching instance"
        );

        let response = self
            .client
            .run_instances()
            .image_id(&config.image_id)
            .instance_type(InstanceType::from(config.instance_type.as_str()))
            .min_count(1)
            .max_count(1)
            .tag_specifications(ec2_tag_spec(ResourceType::Instance, &config.tags))
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to launch instance")?;

        let instance_id = response
            .instances()
            .first()
            .and_then(|i| i.instance_id())
            .context("No instance ID returned")?
            .to_string();

        info!(instance_id = %instance_id, "Instance launched");
        Ok(instance_id)
    }

    /// Stop an instance
    pub async fn stop_instance(&self, instance_id: &str) -> Result<()> {
        info!(instance_id = %instance_id, "Stopping instance");

        self.client
            .stop_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to stop instance")?;

        Ok(())
    }
}

fn summarize(instance: &Instance) -> Option<InstanceSummary> {
    let instance_id = instance.instance_id()?.to_string();
    let tags = tag_set_from_ec2(instance.tags());
    let state = instance
        .state()
        .and_then(|s| s.name())
        .map(|n| n.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Some(InstanceSummary {
        instance_id,
        state,
        name: tags.get(TAG_NAME).map(str::to_string),
        tags,
    })
}
