//! Command handlers
//!
//! Each handler takes its AWS service through an `*Operations` trait, runs
//! the ownership gate, then makes its remote calls in order. Handlers
//! return data; printing happens in [`run`].

pub mod compute;
pub mod dns;
pub mod storage;

use crate::aws::{AwsContext, Ec2Client, FromAwsContext, Route53Client, S3Client};
use crate::cli::{Cli, Command, ComputeCommand, DnsCommand, StorageCommand};
use crate::config::Settings;
use crate::output::{render_instances, render_zones};
use crate::prompt::TerminalConfirmer;
use anyhow::Result;
use chrono::Utc;
use platform_cli_common::{TagPolicy, resolve_operator_identity};
use storage::BucketCreation;
use tracing::{debug, info};

/// Load settings, connect to AWS and execute one command
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?.with_region(cli.region);
    let operator = resolve_operator_identity(&settings.tags.operator_fallback);
    let policy = settings.tags.policy(operator);

    if let Some(profile) = &cli.profile {
        info!(profile = %profile, "Using AWS profile");
    }
    debug!(region = %settings.region, owner = %policy.owner, "Resolved settings");

    let aws = AwsContext::with_profile(&settings.region, cli.profile.as_deref()).await;

    match cli.command {
        Command::Compute(cmd) => run_compute(cmd, &aws, &settings, &policy).await,
        Command::Storage(cmd) => run_storage(cmd, &aws, &settings, &policy).await,
        Command::Dns(cmd) => run_dns(cmd, &aws, &settings, &policy).await,
    }
}

async fn run_compute(
    cmd: ComputeCommand,
    aws: &AwsContext,
    settings: &Settings,
    policy: &TagPolicy,
) -> Result<()> {
    let ec2 = Ec2Client::from_context(aws);

    match cmd {
        ComputeCommand::List { format } => {
            let instances = compute::list_instances(&ec2, policy).await?;
            println!("{}", render_instances(&instances, format)?);
        }
        ComputeCommand::Create { name, os_type } => {
            let os_type = os_type.unwrap_or_else(|| settings.ec2.default_os_type.clone());
            let instance_id =
                compute::create_instance(&ec2, &settings.ec2, policy, &name, &os_type).await?;
            println!("Instance created successfully: {instance_id}");
        }
        ComputeCommand::Stop { instance_id } => {
            compute::stop_instance(&ec2, policy, &instance_id).await?;
            println!("Stop command sent for instance {instance_id}");
        }
    }

    Ok(())
}

async fn run_storage(
    cmd: StorageCommand,
    aws: &AwsContext,
    settings: &Settings,
    policy: &TagPolicy,
) -> Result<()> {
    let s3 = S3Client::from_context(aws);

    match cmd {
        StorageCommand::Create { name, access } => {
            let outcome = storage::create_bucket(
                &s3,
                &TerminalConfirmer,
                &settings.s3,
                policy,
                &name,
                access,
            )
            .await?;
            match outcome {
                BucketCreation::Created => {
                    println!("Created {} bucket: {name}", access.as_str())
                }
                BucketCreation::Aborted => println!("Aborted!"),
            }
        }
        StorageCommand::Upload { bucket, file, key } => {
            let key = storage::upload(&s3, &bucket, &file, key.as_deref()).await?;
            println!("Uploaded '{}' to '{bucket}' as '{key}'", file.display());
        }
        StorageCommand::Download { bucket, key, file } => {
            let path = storage::download(&s3, &bucket, &key, file.as_deref()).await?;
            println!("Downloaded '{key}' from '{bucket}' to '{}'", path.display());
        }
    }

    Ok(())
}

async fn run_dns(
    cmd: DnsCommand,
    aws: &AwsContext,
    settings: &Settings,
    policy: &TagPolicy,
) -> Result<()> {
    let route53 = Route53Client::from_context(aws);

    match cmd {
        DnsCommand::Create { domain } => {
            let zone_id = dns::create_zone(&route53, policy, &domain, Utc::now()).await?;
            println!("Zone created! ID: {zone_id}");
        }
        DnsCommand::List { format } => {
            let zones = dns::list_zones(&route53, policy).await?;
            println!("{}", render_zones(&zones, format)?);
        }
        DnsCommand::ManageRecords {
            zone_id,
            name,
            value,
            action,
        } => {
            let change = dns::manage_records(
                &route53,
                &settings.route53,
                policy,
                &zone_id,
                &name,
                &value,
                action,
            )
            .await?;
            println!(
                "Successfully applied {} on {} ({} {})",
                change.action, change.name, change.record_type, change.value
            );
        }
    }

    Ok(())
}
