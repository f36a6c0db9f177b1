//! Route53 hosted zone and record management

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::classify_sdk_error;
use crate::aws::tags::{route53_tags, tag_set_from_route53};
use anyhow::{Context, Result};
use aws_sdk_route53::Client;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, HostedZone, ResourceRecord, ResourceRecordSet, RrType,
    TagResourceType,
};
use platform_cli_common::TagSet;
use serde::Serialize;
use tracing::{debug, info};

/// Bare hosted zone ID (e.g., `Z123`), without the `/hostedzone/` prefix
/// that Route53 returns from some APIs.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display, derive_more::Deref,
)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Normalize a raw zone ID by dropping everything up to the last `/`.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let id = trimmed.rsplit('/').next().unwrap_or(trimmed);
        ZoneId(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hosted zone as reported by `ListHostedZones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedZoneSummary {
    pub id: ZoneId,
    /// Fully qualified zone name, with trailing dot
    pub name: String,
}

impl From<&HostedZone> for HostedZoneSummary {
    fn from(zone: &HostedZone) -> Self {
        Self {
            id: ZoneId::normalize(zone.id()),
            name: zone.name().to_string(),
        }
    }
}

/// Record set change action
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum RecordAction {
    Create,
    Delete,
    Upsert,
}

impl RecordAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordAction::Create => "CREATE",
            RecordAction::Delete => "DELETE",
            RecordAction::Upsert => "UPSERT",
        }
    }

    fn change_action(self) -> ChangeAction {
        match self {
            RecordAction::Create => ChangeAction::Create,
            RecordAction::Delete => ChangeAction::Delete,
            RecordAction::Upsert => ChangeAction::Upsert,
        }
    }
}

impl std::fmt::Display for RecordAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-value record change submitted as its own batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChange {
    pub action: RecordAction,
    pub name: String,
    pub value: String,
    pub record_type: String,
    pub ttl: i64,
}

impl RecordChange {
    fn to_change_batch(&self) -> Result<ChangeBatch> {
        let record_set = ResourceRecordSet::builder()
            .name(&self.name)
            .r#type(RrType::from(self.record_type.as_str()))
            .ttl(self.ttl)
            .resource_records(ResourceRecord::builder().value(&self.value).build()?)
            .build()?;

        let change = Change::builder()
            .action(self.action.change_action())
            .resource_record_set(record_set)
            .build()?;

        Ok(ChangeBatch::builder().changes(change).build()?)
    }
}

/// Route53 client for managing tagged hosted zones
pub struct Route53Client {
    client: Client,
}

impl FromAwsContext for Route53Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.route53_client(),
        }
    }
}

impl Route53Client {
    /// Create a hosted zone and return the ID exactly as Route53 reports it
    /// (usually `/hostedzone/<id>`).
    pub async fn create_hosted_zone(&self, domain: &str, caller_reference: &str) -> Result<String> {
        info!(domain = %domain, caller_reference = %caller_reference, "Creating hosted zone");

        let response = self
            .client
            .create_hosted_zone()
            .name(domain)
            .caller_reference(caller_reference)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to create hosted zone")?;

        let zone_id = response
            .hosted_zone()
            .map(|z| z.id().to_string())
            .context("No hosted zone returned")?;

        info!(zone_id = %zone_id, "Hosted zone created");
        Ok(zone_id)
    }

    /// Add tags to a hosted zone
    pub async fn tag_hosted_zone(&self, zone_id: &ZoneId, tags: &TagSet) -> Result<()> {
        info!(zone_id = %zone_id, tags = tags.len(), "Tagging hosted zone");

        self.client
            .change_tags_for_resource()
            .resource_type(TagResourceType::Hostedzone)
            .resource_id(zone_id.as_str())
            .set_add_tags(Some(route53_tags(tags)))
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to tag hosted zone")?;

        Ok(())
    }

    /// List every hosted zone in the account, following pagination markers.
    pub async fn list_hosted_zones(&self) -> Result<Vec<HostedZoneSummary>> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let response = self
                .client
                .list_hosted_zones()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e))
                .context("Failed to list hosted zones")?;

            zones.extend(response.hosted_zones().iter().map(HostedZoneSummary::from));

            match response.next_marker() {
                Some(next) if response.is_truncated() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        debug!(count = zones.len(), "Listed hosted zones");
        Ok(zones)
    }

    /// Fetch the tags attached to a hosted zone
    pub async fn list_zone_tags(&self, zone_id: &ZoneId) -> Result<TagSet> {
        debug!(zone_id = %zone_id, "Fetching hosted zone tags");

        let response = self
            .client
            .list_tags_for_resource()
            .resource_type(TagResourceType::Hostedzone)
            .resource_id(zone_id.as_str())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to list hosted zone tags")?;

        Ok(response
            .resource_tag_set()
            .map(|set| tag_set_from_route53(set.tags()))
            .unwrap_or_default())
    }

    /// Submit one record change to a zone
    pub async fn change_record(&self, zone_id: &ZoneId, change: &RecordChange) -> Result<()> {
        info!(
            zone_id = %zone_id,
            action = %change.action,
            name = %change.name,
            record_type = %change.record_type,
            "Changing resource record"
        );

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id.as_str())
            .change_batch(change.to_change_batch()?)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to change resource record set")?;

        Ok(())
    }
}

/// Trait for Route53 operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Route53Operations: Send + Sync {
    async fn create_hosted_zone(&self, domain: &str, caller_reference: &str) -> Result<String>;

    async fn tag_hosted_zone(&self, zone_id: &ZoneId, tags: &TagSet) -> Result<()>;

    async fn list_hosted_zones(&self) -> Result<Vec<HostedZoneSummary>>;

    async fn list_zone_tags(&self, zone_id: &ZoneId) -> Result<TagSet>;

    async fn change_record(&self, zone_id: &ZoneId, change: &RecordChange) -> Result<()>;
}

impl Route53Operations for Route53Client {
    async fn create_hosted_zone(&self, domain: &str, caller_reference: &str) -> Result<String> {
        Route53Client::create_hosted_zone(self, domain, caller_reference).await
    }

    async fn tag_hosted_zone(&self, zone_id: &ZoneId, tags: &TagSet) -> Result<()> {
        Route53Client::tag_hosted_zone(self, zone_id, tags).await
    }

    async fn list_hosted_zones(&self) -> Result<Vec<HostedZoneSummary>> {
        Route53Client::list_hosted_zones(self).await
    }

    async fn list_zone_tags(&self, zone_id: &ZoneId) -> Result<TagSet> {
        Route53Client::list_zone_tags(self, zone_id).await
    }

    async fn change_record(&self, zone_id: &ZoneId, change: &RecordChange) -> Result<()> {
        Route53Client::change_record(self, zone_id, change).await
    }
}
