//! Ownership checks shared by every command family
//!
//! A resource belongs to this tool only if the provider reports the
//! identity marker on it. Nothing is cached: every check queries the
//! provider again.

use crate::aws::{
    Ec2Operations, InstanceQuery, InstanceSummary, Route53Operations, ZoneId, is_not_found,
};
use anyhow::Result;
use platform_cli_common::TagPolicy;
use tracing::{debug, warn};

/// Outcome of checking a single EC2 instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceOwnership {
    Owned(InstanceSummary),
    /// The instance exists but the ownership filter removed it
    NotOwned,
    NotFound,
}

/// Describe one instance through the ownership filter.
///
/// A "not found" error from the provider means the ID does not exist. An
/// empty result means it exists but lacks the identity marker. Any other
/// failure is returned unchanged.
pub async fn instance_ownership<E>(
    ec2: &E,
    policy: &TagPolicy,
    instance_id: &str,
) -> Result<InstanceOwnership>
where
    E: Ec2Operations,
{
    let query = InstanceQuery::owned_by_id(policy.ownership_filter(), instance_id);

    let instances = match ec2.describe_instances(query).await {
        Ok(instances) => instances,
        Err(e) if is_not_found(&e) => {
            debug!(instance_id = %instance_id, error = %e, "Instance does not exist");
            return Ok(InstanceOwnership::NotFound);
        }
        Err(e) => return Err(e),
    };

    let owned = instances
        .into_iter()
        .find(|i| i.instance_id == instance_id && policy.is_owned(i.tags.iter()));

    Ok(match owned {
        Some(instance) => InstanceOwnership::Owned(instance),
        None => InstanceOwnership::NotOwned,
    })
}

/// Outcome of checking a Route53 hosted zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOwnership {
    Owned,
    NotOwned,
    NotFound,
}

/// Look up a zone's tags and check them for the identity marker.
///
/// A "not found" error from the provider means the zone does not exist.
/// Any other lookup failure is returned unchanged.
pub async fn zone_ownership<R>(
    route53: &R,
    policy: &TagPolicy,
    zone_id: &ZoneId,
) -> Result<ZoneOwnership>
where
    R: Route53Operations,
{
    match route53.list_zone_tags(zone_id).await {
        Ok(tags) if policy.is_owned(tags.iter()) => Ok(ZoneOwnership::Owned),
        Ok(_) => Ok(ZoneOwnership::NotOwned),
        Err(e) if is_not_found(&e) => {
            debug!(zone_id = %zone_id, error = %e, "Hosted zone does not exist");
            Ok(ZoneOwnership::NotFound)
        }
        Err(e) => Err(e),
    }
}

/// True only if the zone's tag lookup succeeds and carries the identity marker
pub async fn is_zone_owned<R>(route53: &R, policy: &TagPolicy, zone_id: &ZoneId) -> bool
where
    R: Route53Operations,
{
    match zone_ownership(route53, policy, zone_id).await {
        Ok(ownership) => ownership == ZoneOwnership::Owned,
        Err(e) => {
            warn!(zone_id = %zone_id, error = %e, "Hosted zone tag lookup failed");
            false
        }
    }
}
