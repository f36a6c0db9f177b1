//! EC2 instance commands

use crate::aws::{Ec2Operations, InstanceQuery, InstanceSummary, LaunchInstanceConfig};
use crate::config::Ec2Settings;
use crate::error::CommandError;
use crate::ownership::{InstanceOwnership, instance_ownership};
use platform_cli_common::tags::TAG_NAME;
use platform_cli_common::{ResourceKind, TagPolicy};
use tracing::info;

/// All instances carrying the identity marker
pub async fn list_instances<E>(
    ec2: &E,
    policy: &TagPolicy,
) -> Result<Vec<InstanceSummary>, CommandError>
where
    E: Ec2Operations,
{
    let instances = ec2
        .describe_instances(InstanceQuery::owned(policy.ownership_filter()))
        .await?;

    Ok(instances
        .into_iter()
        .filter(|i| policy.is_owned(i.tags.iter()))
        .collect())
}

/// Number of managed instances that still count toward the ceiling
pub async fn count_owned_instances<E>(ec2: &E, policy: &TagPolicy) -> Result<usize, CommandError>
where
    E: Ec2Operations,
{
    let instances = list_instances(ec2, policy).await?;
    Ok(instances.iter().filter(|i| i.is_live()).count())
}

/// Launch one instance named `name` from the AMI mapped to `os_type`.
///
/// The OS label and tags are checked before any remote call. The launch is
/// refused once the number of live managed instances reaches the ceiling.
pub async fn create_instance<E>(
    ec2: &E,
    settings: &Ec2Settings,
    policy: &TagPolicy,
    name: &str,
    os_type: &str,
) -> Result<String, CommandError>
where
    E: Ec2Operations,
{
    let image_id = settings.resolve_ami(os_type).ok_or_else(|| {
        CommandError::invalid_argument(format!(
            "Unknown OS type '{os_type}' (expected one of: {})",
            settings.os_labels()
        ))
    })?;
    let tags = policy.build_tag_set(&[(TAG_NAME, name)])?;

    let current = count_owned_instances(ec2, policy).await?;
    if current >= settings.max_instances {
        return Err(CommandError::QuotaExceeded {
            current,
            max: settings.max_instances,
        });
    }

    info!(name = %name, os_type = %os_type, current, "Instance quota check passed");

    let config = LaunchInstanceConfig::new(image_id, &settings.instance_type, tags);
    Ok(ec2.launch_instance(config).await?)
}

/// Stop an instance, but only if it carries the identity marker
pub async fn stop_instance<E>(
    ec2: &E,
    policy: &TagPolicy,
    instance_id: &str,
) -> Result<(), CommandError>
where
    E: Ec2Operations,
{
    match instance_ownership(ec2, policy, instance_id).await? {
        InstanceOwnership::NotFound => Err(CommandError::NotFound {
            kind: ResourceKind::Ec2Instance,
            id: instance_id.to_string(),
        }),
        InstanceOwnership::NotOwned => Err(CommandError::AccessDenied {
            kind: ResourceKind::Ec2Instance,
            id: instance_id.to_string(),
            identity: policy.identity_value.clone(),
        }),
        InstanceOwnership::Owned(_) => {
            ec2.stop_instance(instance_id).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::MockEc2Operations;
    use crate::testing::{aws_error, instance, owned_instance, policy, settings};
    use platform_cli_common::TagSet;

    fn owned(count: usize) -> Vec<InstanceSummary> {
        (0..count)
            .map(|n| owned_instance(&format!("i-{n}"), "running"))
            .collect()
    }

    #[tokio::test]
    async fn list_uses_ownership_filter() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances().times(1).returning(|query| {
            assert_eq!(query.instance_id, None);
            assert_eq!(query.owner.tag_filter_name(), "tag:CreatedBy");
            assert_eq!(query.owner.value, "platform-cli");
            Ok(owned(2))
        });

        let instances = list_instances(&ec2, &policy()).await.unwrap();
        assert_eq!(instances.len(), 2);
    }

    #[tokio::test]
    async fn list_drops_instances_without_marker() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances().times(1).returning(|_| {
            let foreign: TagSet = [("CreatedBy", "other-tool")].into_iter().collect();
            Ok(vec![
                owned_instance("i-ours", "running"),
                instance("i-theirs", "running", foreign),
            ])
        });

        let instances = list_instances(&ec2, &policy()).await.unwrap();
        let ids: Vec<_> = instances.iter().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(ids, vec!["i-ours"]);
    }

    #[tokio::test]
    async fn quota_ignores_terminated_instances() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances().times(1).returning(|_| {
            Ok(vec![
                owned_instance("i-1", "running"),
                owned_instance("i-2", "terminated"),
                owned_instance("i-3", "shutting-down"),
                owned_instance("i-4", "stopped"),
            ])
        });

        assert_eq!(count_owned_instances(&ec2, &policy()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn create_at_ceiling_is_refused_without_launch() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Ok(owned(2)));
        ec2.expect_launch_instance().never();

        let err = create_instance(&ec2, &settings().ec2, &policy(), "web-1", "amazon")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::QuotaExceeded { current: 2, max: 2 }
        ));
        assert_eq!(err.exit_code(), 5);
    }

    #[tokio::test]
    async fn create_below_ceiling_launches_once_with_tags() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Ok(owned(1)));
        ec2.expect_launch_instance().times(1).returning(|config| {
            assert_eq!(config.image_id, "ami-0b6c6ebed2801a5cb");
            assert_eq!(config.instance_type, "t3.micro");
            assert_eq!(config.tags.get("CreatedBy"), Some("platform-cli"));
            assert_eq!(config.tags.get("Owner"), Some("alice"));
            assert_eq!(config.tags.get("Name"), Some("web-1"));
            Ok("i-new".to_string())
        });

        let id = create_instance(&ec2, &settings().ec2, &policy(), "web-1", "ubuntu")
            .await
            .unwrap();
        assert_eq!(id, "i-new");
    }

    #[tokio::test]
    async fn create_with_unknown_os_makes_no_calls() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances().never();
        ec2.expect_launch_instance().never();

        let err = create_instance(&ec2, &settings().ec2, &policy(), "web-1", "windows")
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::InvalidArgument(_)));
        assert!(err.to_string().contains("windows"));
    }

    #[tokio::test]
    async fn create_surfaces_launch_failure() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Ok(vec![]));
        ec2.expect_launch_instance()
            .times(1)
            .returning(|_| Err(aws_error("InstanceLimitExceeded")));

        let err = create_instance(&ec2, &settings().ec2, &policy(), "web-1", "amazon")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Remote(_)));
    }

    #[tokio::test]
    async fn stop_unknown_instance_is_not_found() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Err(aws_error("InvalidInstanceID.NotFound")));
        ec2.expect_stop_instance().never();

        let err = stop_instance(&ec2, &policy(), "i-missing").await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound { ref id, .. } if id == "i-missing"));
    }

    #[tokio::test]
    async fn stop_unowned_instance_is_denied() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Ok(vec![]));
        ec2.expect_stop_instance().never();

        let err = stop_instance(&ec2, &policy(), "i-foreign").await.unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied { .. }));
        assert_eq!(
            err.to_string(),
            "Access denied: instance 'i-foreign' was not created by platform-cli"
        );
    }

    #[tokio::test]
    async fn stop_owned_instance_calls_stop_once() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Ok(vec![owned_instance("i-ours", "running")]));
        ec2.expect_stop_instance().times(1).returning(|id| {
            assert_eq!(id, "i-ours");
            Ok(())
        });

        stop_instance(&ec2, &policy(), "i-ours").await.unwrap();
    }

    #[tokio::test]
    async fn stop_surfaces_other_describe_errors() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_instances()
            .times(1)
            .returning(|_| Err(aws_error("UnauthorizedOperation")));
        ec2.expect_stop_instance().never();

        let err = stop_instance(&ec2, &policy(), "i-1").await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
