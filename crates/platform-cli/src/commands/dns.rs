//! Route53 zone and record commands

use crate::aws::{HostedZoneSummary, RecordAction, RecordChange, Route53Operations, ZoneId};
use crate::config::Route53Settings;
use crate::error::CommandError;
use crate::ownership::{ZoneOwnership, is_zone_owned, zone_ownership};
use anyhow::Context;
use chrono::{DateTime, Utc};
use platform_cli_common::tags::{TAG_TIMESTAMP, format_timestamp};
use platform_cli_common::{ResourceKind, TagPolicy};
use tracing::{debug, info};

/// Create a hosted zone and tag it.
///
/// `now` becomes both the caller reference and the `Timestamp` tag. The tag
/// call uses the zone ID with its `/hostedzone/` prefix stripped.
pub async fn create_zone<R>(
    route53: &R,
    policy: &TagPolicy,
    domain: &str,
    now: DateTime<Utc>,
) -> Result<ZoneId, CommandError>
where
    R: Route53Operations,
{
    let caller_reference = format_timestamp(now);
    let tags = policy.build_tag_set(&[(TAG_TIMESTAMP, caller_reference.as_str())])?;

    let raw_id = route53
        .create_hosted_zone(domain, &caller_reference)
        .await?;
    let zone_id = ZoneId::normalize(&raw_id);

    route53
        .tag_hosted_zone(&zone_id, &tags)
        .await
        .with_context(|| {
            format!(
                "Zone {zone_id} was created but could not be tagged. \
                 The zone was left in place and is not recognized as managed"
            )
        })?;

    Ok(zone_id)
}

/// Every hosted zone carrying the identity marker.
///
/// Costs one tag lookup per zone in the account. Zones whose lookup fails
/// are skipped.
pub async fn list_zones<R>(
    route53: &R,
    policy: &TagPolicy,
) -> Result<Vec<HostedZoneSummary>, CommandError>
where
    R: Route53Operations,
{
    let zones = route53.list_hosted_zones().await?;
    let total = zones.len();

    let mut owned = Vec::new();
    for zone in zones {
        if is_zone_owned(route53, policy, &zone.id).await {
            owned.push(zone);
        }
    }

    debug!(total, owned = owned.len(), "Filtered hosted zones by ownership");
    Ok(owned)
}

/// Submit one record change to a zone this tool created.
///
/// A zone the provider does not know is reported as not found; a zone
/// without the identity marker is refused. Neither case makes a change call.
/// Other lookup failures are remote errors.
pub async fn manage_records<R>(
    route53: &R,
    settings: &Route53Settings,
    policy: &TagPolicy,
    zone_id: &str,
    name: &str,
    value: &str,
    action: RecordAction,
) -> Result<RecordChange, CommandError>
where
    R: Route53Operations,
{
    let zone_id = ZoneId::normalize(zone_id);
    if zone_id.is_empty() {
        return Err(CommandError::invalid_argument("Zone ID cannot be empty"));
    }

    match zone_ownership(route53, policy, &zone_id).await? {
        ZoneOwnership::NotFound => {
            return Err(CommandError::NotFound {
                kind: ResourceKind::HostedZone,
                id: zone_id.to_string(),
            });
        }
        ZoneOwnership::NotOwned => {
            return Err(CommandError::AccessDenied {
                kind: ResourceKind::HostedZone,
                id: zone_id.to_string(),
                identity: policy.identity_value.clone(),
            });
        }
        ZoneOwnership::Owned => {}
    }

    let change = RecordChange {
        action,
        name: name.to_string(),
        value: value.to_string(),
        record_type: settings.record_type.clone(),
        ttl: settings.record_ttl,
    };

    route53.change_record(&zone_id, &change).await?;
    info!(zone_id = %zone_id, action = %action, name = %name, "Record change submitted");

    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::MockRoute53Operations;
    use crate::testing::{aws_error, policy, settings};
    use chrono::TimeZone;
    use mockall::Sequence;
    use platform_cli_common::TagSet;

    fn zone(id: &str, name: &str) -> HostedZoneSummary {
        HostedZoneSummary {
            id: ZoneId::normalize(id),
            name: name.to_string(),
        }
    }

    fn foreign_tags() -> TagSet {
        [("CreatedBy", "someone-else")].into_iter().collect()
    }

    #[tokio::test]
    async fn create_zone_tags_stripped_id() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let expected_ref = format_timestamp(now);

        let mut seq = Sequence::new();
        let mut route53 = MockRoute53Operations::new();
        let check_ref = expected_ref.clone();
        route53
            .expect_create_hosted_zone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |domain, caller_ref| {
                assert_eq!(domain, "example.com");
                assert_eq!(caller_ref, check_ref);
                Ok("/hostedzone/Z123".to_string())
            });
        let check_ref = expected_ref.clone();
        route53
            .expect_tag_hosted_zone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |zone_id, tags| {
                assert_eq!(zone_id.as_str(), "Z123");
                assert_eq!(tags.get("CreatedBy"), Some("platform-cli"));
                assert_eq!(tags.get("Timestamp"), Some(check_ref.as_str()));
                Ok(())
            });

        let zone_id = create_zone(&route53, &policy(), "example.com", now)
            .await
            .unwrap();
        assert_eq!(zone_id.as_str(), "Z123");
    }

    #[tokio::test]
    async fn create_zone_failure_skips_tagging() {
        let mut route53 = MockRoute53Operations::new();
        route53
            .expect_create_hosted_zone()
            .times(1)
            .returning(|_, _| Err(aws_error("InvalidDomainName")));
        route53.expect_tag_hosted_zone().never();

        let err = create_zone(&route53, &policy(), "bad..name", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Remote(_)));
    }

    #[tokio::test]
    async fn create_zone_flags_untagged_zone() {
        let mut route53 = MockRoute53Operations::new();
        route53
            .expect_create_hosted_zone()
            .times(1)
            .returning(|_, _| Ok("/hostedzone/Z9".to_string()));
        route53
            .expect_tag_hosted_zone()
            .times(1)
            .returning(|_, _| Err(aws_error("Throttling")));

        let err = create_zone(&route53, &policy(), "example.org", Utc::now())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Zone Z9 was created"));
    }

    #[tokio::test]
    async fn list_zones_keeps_only_owned() {
        let mut route53 = MockRoute53Operations::new();
        route53.expect_list_hosted_zones().times(1).returning(|| {
            Ok(vec![
                zone("/hostedzone/ZOURS", "ours.example."),
                zone("/hostedzone/ZTHEIRS", "theirs.example."),
                zone("/hostedzone/ZBROKEN", "broken.example."),
            ])
        });
        route53
            .expect_list_zone_tags()
            .times(3)
            .returning(|zone_id| match zone_id.as_str() {
                "ZOURS" => Ok(policy().baseline()),
                "ZTHEIRS" => Ok(foreign_tags()),
                _ => Err(aws_error("AccessDenied")),
            });

        let zones = list_zones(&route53, &policy()).await.unwrap();
        let names: Vec<_> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["ours.example."]);
    }

    #[tokio::test]
    async fn list_zones_propagates_listing_failure() {
        let mut route53 = MockRoute53Operations::new();
        route53
            .expect_list_hosted_zones()
            .times(1)
            .returning(|| Err(aws_error("AccessDenied")));
        route53.expect_list_zone_tags().never();

        assert!(list_zones(&route53, &policy()).await.is_err());
    }

    #[tokio::test]
    async fn manage_records_on_unknown_zone_is_not_found() {
        let mut route53 = MockRoute53Operations::new();
        route53
            .expect_list_zone_tags()
            .times(1)
            .returning(|_| Err(aws_error("NoSuchHostedZone")));
        route53.expect_change_record().never();

        let err = manage_records(
            &route53,
            &settings().route53,
            &policy(),
            "Z404",
            "www.example.com",
            "192.0.2.1",
            RecordAction::Create,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            CommandError::NotFound { kind: ResourceKind::HostedZone, ref id } if id == "Z404"
        ));
    }

    #[tokio::test]
    async fn manage_records_on_unowned_zone_is_denied() {
        let mut route53 = MockRoute53Operations::new();
        route53
            .expect_list_zone_tags()
            .times(1)
            .returning(|_| Ok(foreign_tags()));
        route53.expect_change_record().never();

        let err = manage_records(
            &route53,
            &settings().route53,
            &policy(),
            "ZTHEIRS",
            "www.example.com",
            "192.0.2.1",
            RecordAction::Upsert,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::AccessDenied { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn manage_records_lookup_failure_is_remote_error() {
        let mut route53 = MockRoute53Operations::new();
        route53
            .expect_list_zone_tags()
            .times(1)
            .returning(|_| Err(aws_error("Throttling")));
        route53.expect_change_record().never();

        let err = manage_records(
            &route53,
            &settings().route53,
            &policy(),
            "Z123",
            "www.example.com",
            "192.0.2.1",
            RecordAction::Upsert,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::Remote(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn manage_records_submits_one_a_record() {
        let mut route53 = MockRoute53Operations::new();
        route53.expect_list_zone_tags().times(1).returning(|zone_id| {
            assert_eq!(zone_id.as_str(), "Z123");
            Ok(policy().baseline())
        });
        route53
            .expect_change_record()
            .times(1)
            .returning(|zone_id, change| {
                assert_eq!(zone_id.as_str(), "Z123");
                assert_eq!(change.action, RecordAction::Delete);
                assert_eq!(change.record_type, "A");
                assert_eq!(change.ttl, 300);
                assert_eq!(change.value, "192.0.2.1");
                Ok(())
            });

        let change = manage_records(
            &route53,
            &settings().route53,
            &policy(),
            "/hostedzone/Z123",
            "www.example.com",
            "192.0.2.1",
            RecordAction::Delete,
        )
        .await
        .unwrap();

        assert_eq!(change.name, "www.example.com");
    }

    #[tokio::test]
    async fn manage_records_rejects_blank_zone_id() {
        let mut route53 = MockRoute53Operations::new();
        route53.expect_list_zone_tags().never();
        route53.expect_change_record().never();

        let err = manage_records(
            &route53,
            &settings().route53,
            &policy(),
            "/hostedzone/",
            "www.example.com",
            "192.0.2.1",
            RecordAction::Create,
        )
        .await
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
